use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reporteria").unwrap();
    cmd.env("REPORTERIA_DATA_DIR", data_dir)
        .env("RUST_LOG", "reporteria=warn");
    cmd
}

fn write_script(dir: &Path, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join("session.txt");
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[test]
fn schema_lists_every_category() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(contains("CABECERA"))
        .stdout(contains("DETALLECLIENTE"))
        .stdout(contains("DETALLEOPERACION"))
        .stdout(contains("DETALLETRANSACCION"));
}

#[test]
fn schema_single_category() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .args(["schema", "transaction"])
        .assert()
        .success()
        .stdout(contains("MPG"))
        .stdout(contains("CABECERA").not());
}

#[test]
fn schema_rejects_unknown_category() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .args(["schema", "ledger"])
        .assert()
        .failure()
        .stderr(contains("unknown category"));
}

#[test]
fn config_shows_paths() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("documentos"))
        .stdout(contains("full history"));
}

#[test]
fn session_capture_and_close() {
    let tmp = TempDir::new().unwrap();
    let script = write_script(
        tmp.path(),
        &[
            "use AB123 --date 2024-02-15",
            "add header USR=operador CLI=2",
            "add header",
            "add operation IDE=0102 VTO=1500.25",
            "add transaction VTR=10 MPG=Cheque",
            "add transaction VTR=20",
            "add transaction VTR=30",
            "status",
            "close",
        ],
    );

    cmd(tmp.path())
        .args(["session", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(contains("Cabecera saved. Records in memory: 2"))
        .stdout(contains("Transacción saved. Records in memory: 3"))
        .stdout(contains("Period 202402 closed for registry code AB123"));

    let out = tmp.path().join("documentos");
    for name in [
        "CABECERA_AB123_202402.xlsx",
        "DETALLECLIENTE_AB123_202402.xlsx",
        "DETALLEOPERACION_AB123_202402.xlsx",
        "DETALLETRANSACCION_AB123_202402.xlsx",
        "reporteria_general.xlsx",
    ] {
        let bytes = fs::read(out.join(name)).unwrap();
        assert_eq!(&bytes[..2], b"PK", "{} is not a zip container", name);
    }
}

#[test]
fn session_export_keeps_records() {
    let tmp = TempDir::new().unwrap();
    let script = write_script(
        tmp.path(),
        &[
            "use AB1 --date 20240301",
            "add client IDE=0102 'NRS=Ana María'",
            "export client",
            "status",
        ],
    );

    cmd(tmp.path())
        .args(["session", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(contains("Exported 1 rows"))
        .stdout(contains(format!("{:<20}  {:>8}", "TOTAL", 1)));

    assert!(tmp
        .path()
        .join("documentos")
        .join("DETALLECLIENTE_AB1_202403.xlsx")
        .exists());
}

#[test]
fn session_reports_failed_commands() {
    let tmp = TempDir::new().unwrap();
    let script = write_script(
        tmp.path(),
        &["add header", "use AB1 --date 2024-02-15", "add header TVT=lots"],
    );

    cmd(tmp.path())
        .args(["session", "--script"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(contains("No registry code set"))
        .stderr(contains("2 of 3 commands failed"));
}

#[test]
fn session_reads_stdin() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .arg("session")
        .write_stdin("use AB1 --date 2024-02-15\nadd operation\nexit\nadd operation\n")
        .assert()
        .success()
        .stdout(contains("Operación saved. Records in memory: 1"))
        .stdout(contains("Records in memory: 2").not());
}

#[test]
fn audit_lists_session_activity() {
    let tmp = TempDir::new().unwrap();
    let script = write_script(
        tmp.path(),
        &["use AB1 --date 2024-02-15", "add header", "close"],
    );

    cmd(tmp.path())
        .args(["session", "--script"])
        .arg(&script)
        .assert()
        .success();

    cmd(tmp.path())
        .args(["audit", "--limit", "50"])
        .assert()
        .success()
        .stdout(contains("APPEND"))
        .stdout(contains("EXPORT"))
        .stdout(contains("CLOSEOUT"));
}

#[test]
fn publishing_copies_closeout_files() {
    let tmp = TempDir::new().unwrap();
    let outbox = tmp.path().join("outbox");
    let settings = serde_json::json!({
        "publish": { "enabled": true, "target_dir": outbox },
        "consolidated_scope": "period"
    });
    fs::write(
        tmp.path().join("config.json"),
        serde_json::to_vec_pretty(&settings).unwrap(),
    )
    .unwrap();

    let script = write_script(
        tmp.path(),
        &["use AB1 --date 2024-02-15", "add client", "close"],
    );

    cmd(tmp.path())
        .args(["session", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(contains("Published:"))
        .stdout(contains("(period)"));

    assert!(outbox.join("DETALLECLIENTE_AB1_202402.xlsx").exists());
    assert!(outbox.join("reporteria_general.xlsx").exists());
}
