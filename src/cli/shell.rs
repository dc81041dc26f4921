//! Line-oriented session shell
//!
//! Reads commands from a script file or standard input, one per line.
//! Lines are split with shell quoting rules; blank lines and lines starting
//! with `#` are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::Path;

use shell_words::split;

use super::session::{Outcome, Session};
use crate::error::{ReportError, ReportResult};

const PROMPT: &str = "reporteria> ";

/// Totals of a finished session run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellSummary {
    pub commands: usize,
    pub failures: usize,
}

/// Split a command line into tokens
pub fn parse_command_line(input: &str) -> ReportResult<Vec<String>> {
    split(input).map_err(|e| ReportError::Validation(format!("Could not parse line: {}", e)))
}

/// Run commands from a script file
pub fn run_script(session: &mut Session, script: &Path) -> ReportResult<ShellSummary> {
    let file = File::open(script).map_err(|e| {
        ReportError::Io(format!("Failed to open script {}: {}", script.display(), e))
    })?;
    run_lines(session, BufReader::new(file), false)
}

/// Run commands from standard input, prompting when it is a terminal
pub fn run_stdin(session: &mut Session) -> ReportResult<ShellSummary> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    run_lines(session, stdin.lock(), interactive)
}

fn run_lines<R: BufRead>(
    session: &mut Session,
    reader: R,
    interactive: bool,
) -> ReportResult<ShellSummary> {
    let mut summary = ShellSummary::default();
    let mut lines = reader.lines();

    loop {
        if interactive {
            print!("{}", PROMPT);
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        summary.commands += 1;
        match handle_line(session, trimmed) {
            Ok(Outcome::Output(text)) => println!("{}", text.trim_end()),
            Ok(Outcome::Exit) => break,
            Err(e) => {
                summary.failures += 1;
                tracing::debug!(line = trimmed, "command failed: {}", e);
                eprintln!("Error: {}", e.to_string().trim_end());
            }
        }
    }

    Ok(summary)
}

fn handle_line(session: &mut Session, line: &str) -> ReportResult<Outcome> {
    let tokens = parse_command_line(line)?;
    if tokens.is_empty() {
        return Ok(Outcome::Output(String::new()));
    }
    session.execute(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ReportPaths, Settings};
    use crate::models::Category;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(temp_dir: &TempDir) -> Session {
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        Session::new(paths, Settings::default())
    }

    #[test]
    fn test_parse_command_line_quotes() {
        let tokens = parse_command_line("add client 'NRS=Ana María' IDE=1").unwrap();
        assert_eq!(tokens, vec!["add", "client", "NRS=Ana María", "IDE=1"]);
        assert!(parse_command_line("add 'unterminated").is_err());
    }

    #[test]
    fn test_run_lines_counts_failures() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        let script = "# capture\nuse AB1 --date 2024-02-15\n\nadd header\nadd nowhere\nstatus\n";

        let summary = run_lines(&mut session, Cursor::new(script), false).unwrap();

        assert_eq!(summary.commands, 4);
        assert_eq!(summary.failures, 1);
        assert_eq!(session.store().len(Category::Header).unwrap(), 1);
    }

    #[test]
    fn test_exit_stops_reading() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        let script = "use AB1\nexit\nadd header\n";

        let summary = run_lines(&mut session, Cursor::new(script), false).unwrap();

        assert_eq!(summary.commands, 2);
        assert!(session.store().is_empty().unwrap());
    }

    #[test]
    fn test_missing_script() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        let result = run_script(&mut session, &temp_dir.path().join("missing.txt"));
        assert!(result.is_err());
    }
}
