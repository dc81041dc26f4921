//! Flat report records
//!
//! A record is an ordered mapping from field code to a scalar value. Field
//! order is insertion order and is preserved through export.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::schema::REPORT_PERIOD;

/// Length of a period key (`YYYYMM`)
pub const PERIOD_KEY_LEN: usize = 6;

/// A scalar field value
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl FieldValue {
    /// Borrow the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Decimal(d) => write!(f, "{:.2}", d),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for FieldValue {
    fn from(d: f64) -> Self {
        Self::Decimal(d)
    }
}

/// An ordered field-code → value mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, code: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(code, value);
        self
    }

    /// Set a field, keeping its original position if it already exists
    pub fn insert(&mut self, code: impl Into<String>, value: impl Into<FieldValue>) {
        let code = code.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == code) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((code, value)),
        }
    }

    /// Get a field value by code
    pub fn get(&self, code: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, v)| v)
    }

    /// Iterate over fields in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Field codes in order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The report period field, if present as text
    pub fn report_period(&self) -> Option<&str> {
        self.get(REPORT_PERIOD).and_then(FieldValue::as_text)
    }

    /// The `YYYYMM` prefix of the report period
    ///
    /// `None` when the record has no usable report period.
    pub fn period_key(&self) -> Option<&str> {
        self.report_period()
            .and_then(|pdr| pdr.get(..PERIOD_KEY_LEN))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (code, value) in &self.fields {
            map.serialize_entry(code, value)?;
        }
        map.end()
    }
}
