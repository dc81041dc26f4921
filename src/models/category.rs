//! Report categories
//!
//! The four record categories of a monthly submission. Each one has a fixed
//! field schema and a canonical name used for file and sheet names.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::schema::{self, FieldSpec};

/// A record category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Submission header with the period totals
    Header,
    /// Client detail rows
    Client,
    /// Operation (contract) detail rows
    Operation,
    /// Transaction detail rows
    Transaction,
}

impl Category {
    /// All categories in export order
    pub const ALL: [Category; 4] = [
        Category::Header,
        Category::Client,
        Category::Operation,
        Category::Transaction,
    ];

    /// Canonical name used in file names and sheet names
    ///
    /// Downstream tooling matches these exactly.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Header => "CABECERA",
            Self::Client => "DETALLECLIENTE",
            Self::Operation => "DETALLEOPERACION",
            Self::Transaction => "DETALLETRANSACCION",
        }
    }

    /// Human-facing label used in acknowledgments
    pub fn label(&self) -> &'static str {
        match self {
            Self::Header => "Cabecera",
            Self::Client => "Cliente",
            Self::Operation => "Operación",
            Self::Transaction => "Transacción",
        }
    }

    /// Fixed field schema for this category, in record order
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            Self::Header => schema::HEADER_FIELDS,
            Self::Client => schema::CLIENT_FIELDS,
            Self::Operation => schema::OPERATION_FIELDS,
            Self::Transaction => schema::TRANSACTION_FIELDS,
        }
    }

    /// Look up a field of this category by its code
    pub fn field(&self, code: &str) -> Option<&'static FieldSpec> {
        self.schema().iter().find(|f| f.code == code)
    }

    /// Parse a category from user input
    ///
    /// Accepts the English names, the Spanish labels and the canonical names,
    /// case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "header" | "cabecera" => Some(Self::Header),
            "client" | "cliente" | "detallecliente" => Some(Self::Client),
            "operation" | "operacion" | "operación" | "detalleoperacion" => Some(Self::Operation),
            "transaction" | "transaccion" | "transacción" | "detalletransaccion" => {
                Some(Self::Transaction)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "Header"),
            Self::Client => write!(f, "Client"),
            Self::Operation => write!(f, "Operation"),
            Self::Transaction => write!(f, "Transaction"),
        }
    }
}
