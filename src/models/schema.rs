//! Field schemas for each report category
//!
//! Every category has a fixed list of fields. A field knows its code, a
//! human label and the kind of value it holds, which drives how captured
//! input is converted and which default an omitted field receives.

use chrono::NaiveDate;

use super::period::parse_report_date;
use super::record::FieldValue;
use crate::error::{ReportError, ReportResult};

/// Kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text, optionally limited in length
    Text { max_len: Option<usize> },
    /// One of a list of labels; the first one is the default
    Choice(&'static [&'static str]),
    /// Whole number
    Integer,
    /// Decimal amount
    Decimal,
    /// Calendar date, stored as `YYYYMMDD`
    Date,
}

impl FieldKind {
    /// Short name shown in schema listings
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Choice(_) => "choice",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Date => "date",
        }
    }
}

/// A single field of a category schema
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub code: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(code: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { code, label, kind }
    }

    /// Fields supplied by the session context rather than by the form
    pub fn is_context(&self) -> bool {
        self.code == REGISTRY_CODE || self.code == REPORT_PERIOD
    }

    /// Value an omitted field receives
    ///
    /// Dates default to the report date, as the form's date pickers do.
    pub fn default_value(&self, report_date: NaiveDate) -> FieldValue {
        match self.kind {
            FieldKind::Text { .. } => FieldValue::Text(String::new()),
            FieldKind::Choice(options) => {
                FieldValue::Text(options.first().copied().unwrap_or_default().to_string())
            }
            FieldKind::Integer => FieldValue::Integer(0),
            FieldKind::Decimal => FieldValue::Decimal(0.0),
            FieldKind::Date => FieldValue::Text(report_date.format("%Y%m%d").to_string()),
        }
    }

    /// Convert raw input into a value of this field's kind
    pub fn parse_value(&self, raw: &str) -> ReportResult<FieldValue> {
        let raw = raw.trim();
        match self.kind {
            FieldKind::Text { max_len } => {
                if let Some(max) = max_len {
                    if raw.chars().count() > max {
                        return Err(ReportError::Validation(format!(
                            "{} ({}) accepts at most {} characters",
                            self.code, self.label, max
                        )));
                    }
                }
                Ok(FieldValue::Text(raw.to_string()))
            }
            FieldKind::Choice(_) => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Integer => {
                let n = raw.parse::<i64>().map_err(|_| {
                    ReportError::Validation(format!(
                        "{} ({}) expects a whole number, got '{}'",
                        self.code, self.label, raw
                    ))
                })?;
                if !(0..=MAX_INTEGER).contains(&n) {
                    return Err(ReportError::Validation(format!(
                        "{} ({}) must be between 0 and {}, got {}",
                        self.code, self.label, MAX_INTEGER, n
                    )));
                }
                Ok(FieldValue::Integer(n))
            }
            FieldKind::Decimal => {
                let d = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|d| d.is_finite())
                    .ok_or_else(|| {
                        ReportError::Validation(format!(
                            "{} ({}) expects a number, got '{}'",
                            self.code, self.label, raw
                        ))
                    })?;
                if d < 0.0 {
                    return Err(ReportError::Validation(format!(
                        "{} ({}) cannot be negative, got {}",
                        self.code, self.label, raw
                    )));
                }
                Ok(FieldValue::Decimal(d))
            }
            FieldKind::Date => {
                let date = parse_report_date(raw)?;
                Ok(FieldValue::Text(date.format("%Y%m%d").to_string()))
            }
        }
    }
}

/// Registry code field, common to every category
pub const REGISTRY_CODE: &str = "CDR";

/// Report period field, common to every category
pub const REPORT_PERIOD: &str = "PDR";

/// Maximum length of the registry code
pub const REGISTRY_CODE_MAX_LEN: usize = 5;

/// Largest whole number a spreadsheet cell holds exactly (2^53)
pub const MAX_INTEGER: i64 = 1 << 53;

/// Check a registry code before it is used
///
/// The code becomes part of exported file names, so path separators and
/// other characters file systems reject are refused.
pub fn check_registry_code(cdr: &str) -> ReportResult<()> {
    if cdr.chars().count() > REGISTRY_CODE_MAX_LEN {
        return Err(ReportError::Validation(format!(
            "Registry code '{}' is longer than {} characters",
            cdr, REGISTRY_CODE_MAX_LEN
        )));
    }
    let forbidden = |c: &char| {
        matches!(*c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
    };
    if let Some(c) = cdr.chars().find(forbidden) {
        return Err(ReportError::Validation(format!(
            "Registry code '{}' contains '{}', which cannot appear in a file name",
            cdr,
            c.escape_default()
        )));
    }
    if cdr == "." || cdr == ".." {
        return Err(ReportError::Validation(format!(
            "Registry code '{}' is not a valid file name part",
            cdr
        )));
    }
    Ok(())
}

const ID_TYPES: &[&str] = &["Cédula", "RUC", "Pasaporte"];
const THIRD_PARTY_ID_TYPES: &[&str] = &["Cédula", "RUC", "Pasaporte", "N/A"];
const CURRENCIES: &[&str] = &["USD", "EUR", "Otro"];
const OPERATION_TYPES: &[&str] = &["Venta", "Crédito", "Otro"];
const RESOURCE_ORIGINS: &[&str] = &["Propios", "Terceros"];
const PAYMENT_METHODS: &[&str] = &["Efectivo", "Cheque", "Tarjeta", "Transferencia", "Otro"];

const TEXT: FieldKind = FieldKind::Text { max_len: None };
const CDR: FieldSpec = FieldSpec::new(
    REGISTRY_CODE,
    "Código de Registro",
    FieldKind::Text {
        max_len: Some(REGISTRY_CODE_MAX_LEN),
    },
);
const PDR: FieldSpec = FieldSpec::new(REPORT_PERIOD, "Periodo de Reporte", FieldKind::Date);

pub const HEADER_FIELDS: &[FieldSpec] = &[
    CDR,
    PDR,
    FieldSpec::new("FRE", "Fecha de Corte", FieldKind::Date),
    FieldSpec::new("USR", "Usuario", FieldKind::Text { max_len: Some(20) }),
    FieldSpec::new("CLI", "Total Clientes", FieldKind::Integer),
    FieldSpec::new("TRO", "Total Operaciones", FieldKind::Integer),
    FieldSpec::new("TRA", "Total Transacciones", FieldKind::Integer),
    FieldSpec::new("TVO", "Suma Valor Operaciones", FieldKind::Integer),
    FieldSpec::new("TDE", "Detalles de Operación", FieldKind::Integer),
    FieldSpec::new("TCR", "Total Crédito", FieldKind::Integer),
    FieldSpec::new("TEF", "Total Efectivo", FieldKind::Integer),
    FieldSpec::new("TCH", "Total Cheque", FieldKind::Integer),
    FieldSpec::new("TTC", "Total Tarjeta Crédito", FieldKind::Integer),
    FieldSpec::new("TVF", "Total Financiamiento", FieldKind::Integer),
    FieldSpec::new("TCD", "Total Crédito Directo", FieldKind::Integer),
    FieldSpec::new("TCV", "Total Contratos", FieldKind::Integer),
    FieldSpec::new("TVT", "Valor Total", FieldKind::Integer),
];

pub const CLIENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("TID", "Tipo Identificación", FieldKind::Choice(ID_TYPES)),
    FieldSpec::new("IDE", "Identificación", TEXT),
    FieldSpec::new("NRS", "Nombres / Razón Social", TEXT),
    FieldSpec::new("NAC", "Nacionalidad", TEXT),
    FieldSpec::new("DIR", "Dirección", TEXT),
    FieldSpec::new("CCC", "Cantón", TEXT),
    FieldSpec::new("AEC", "Actividad Económica", TEXT),
    FieldSpec::new("IMT", "Ingreso Mensual", FieldKind::Decimal),
    CDR,
    PDR,
];

pub const OPERATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("TID", "Tipo Identificación", FieldKind::Choice(ID_TYPES)),
    FieldSpec::new("IDE", "Identificación", TEXT),
    FieldSpec::new("NCT", "Número de Operación/Contrato", TEXT),
    FieldSpec::new("VTO", "Valor Operación", FieldKind::Decimal),
    FieldSpec::new("FDO", "Fecha Operación", FieldKind::Date),
    FieldSpec::new("VCH", "Valor Cheque", FieldKind::Decimal),
    FieldSpec::new("VTC", "Valor Tarjeta", FieldKind::Decimal),
    FieldSpec::new("VFC", "Valor Financiamiento", FieldKind::Decimal),
    FieldSpec::new("VCD", "Valor Crédito Directo", FieldKind::Decimal),
    FieldSpec::new("VCV", "Valor Contrato/Bien", FieldKind::Decimal),
    FieldSpec::new("VVT", "Valor Total", FieldKind::Decimal),
    FieldSpec::new("MND", "Moneda", FieldKind::Choice(CURRENCIES)),
    FieldSpec::new("TTR", "Tipo Transacción", FieldKind::Choice(OPERATION_TYPES)),
    FieldSpec::new("CAT", "Código Agencia", TEXT),
    FieldSpec::new("RPT", "Recursos Propios/Terceros", FieldKind::Choice(RESOURCE_ORIGINS)),
    FieldSpec::new("TIT", "Tipo ID Tercero", FieldKind::Choice(THIRD_PARTY_ID_TYPES)),
    FieldSpec::new("IDT", "ID Tercero", TEXT),
    FieldSpec::new("NRT", "Nombre Tercero", TEXT),
    CDR,
    PDR,
];

pub const TRANSACTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("TID", "Tipo ID", FieldKind::Choice(ID_TYPES)),
    FieldSpec::new("IDE", "Identificación", TEXT),
    FieldSpec::new("CTR", "Código Transacción", TEXT),
    FieldSpec::new("FTR", "Fecha Transacción", FieldKind::Date),
    FieldSpec::new("VTR", "Valor", FieldKind::Decimal),
    FieldSpec::new("MPG", "Medio de Pago", FieldKind::Choice(PAYMENT_METHODS)),
    FieldSpec::new("CAT", "Código Agencia", TEXT),
    CDR,
    PDR,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    #[test]
    fn test_defaults_follow_kind() {
        let tid = CLIENT_FIELDS[0];
        assert_eq!(tid.default_value(date()), FieldValue::Text("Cédula".into()));
        assert_eq!(HEADER_FIELDS[4].default_value(date()), FieldValue::Integer(0));
        assert_eq!(
            OPERATION_FIELDS[4].default_value(date()),
            FieldValue::Text("20240215".into())
        );
    }

    #[test]
    fn test_parse_numbers() {
        let cli = HEADER_FIELDS[4];
        assert_eq!(cli.parse_value("12").unwrap(), FieldValue::Integer(12));
        assert!(cli.parse_value("12.5").unwrap_err().is_validation());

        let imt = CLIENT_FIELDS[7];
        assert_eq!(imt.parse_value("1500.75").unwrap(), FieldValue::Decimal(1500.75));
        assert!(imt.parse_value("NaN").is_err());
        assert!(imt.parse_value("mil").is_err());
    }

    #[test]
    fn test_integers_stay_within_exact_cell_range() {
        let tvt = HEADER_FIELDS[16];
        assert_eq!(
            tvt.parse_value("9007199254740992").unwrap(),
            FieldValue::Integer(MAX_INTEGER)
        );
        assert!(tvt.parse_value("9007199254740993").unwrap_err().is_validation());
        assert!(tvt.parse_value("9223372036854775807").unwrap_err().is_validation());
    }

    #[test]
    fn test_negative_numbers_rejected() {
        let cli = HEADER_FIELDS[4];
        assert!(cli.parse_value("-5").unwrap_err().is_validation());
        assert_eq!(cli.parse_value("0").unwrap(), FieldValue::Integer(0));

        let imt = CLIENT_FIELDS[7];
        assert!(imt.parse_value("-1500.5").unwrap_err().is_validation());
        assert_eq!(imt.parse_value("0.0").unwrap(), FieldValue::Decimal(0.0));
    }

    #[test]
    fn test_registry_code_checks() {
        assert!(check_registry_code("AB123").is_ok());
        assert!(check_registry_code("").is_ok());
        assert!(check_registry_code("AB1234").unwrap_err().is_validation());
        assert!(check_registry_code("a/b").unwrap_err().is_validation());
        assert!(check_registry_code("a\\b").unwrap_err().is_validation());
        assert!(check_registry_code("..").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date_normalizes() {
        let fre = HEADER_FIELDS[2];
        assert_eq!(
            fre.parse_value("2024-01-31").unwrap(),
            FieldValue::Text("20240131".into())
        );
        assert_eq!(
            fre.parse_value("20240131").unwrap(),
            FieldValue::Text("20240131".into())
        );
    }

    #[test]
    fn test_text_length_limit() {
        assert!(CDR.parse_value("ABCDE").is_ok());
        assert!(CDR.parse_value("ABCDEF").unwrap_err().is_validation());
    }

    #[test]
    fn test_choice_accepts_any_label() {
        let mpg = TRANSACTION_FIELDS[5];
        assert_eq!(
            mpg.parse_value("Cripto").unwrap(),
            FieldValue::Text("Cripto".into())
        );
    }

    #[test]
    fn test_context_fields() {
        assert!(CDR.is_context());
        assert!(PDR.is_context());
        assert!(!HEADER_FIELDS[2].is_context());
    }
}
