//! Line-oriented key/value rendering of normalized records.
//!
//! A [`Report`] is an ordered list of labeled values; rendering walks it
//! depth-first, printing `key: value` lines and recursing under a `key:`
//! header for nested reports. Field order is the record's declared order.

use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Text(String),
    Count(u64),
    Flag(bool),
    List(Vec<String>),
    Nested(Report),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map(FieldValue::Text).unwrap_or(FieldValue::Absent)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Count(value)
    }
}

impl From<Option<u64>> for FieldValue {
    fn from(value: Option<u64>) -> Self {
        value.map(FieldValue::Count).unwrap_or(FieldValue::Absent)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Option<bool>> for FieldValue {
    fn from(value: Option<bool>) -> Self {
        value.map(FieldValue::Flag).unwrap_or(FieldValue::Absent)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Report> for FieldValue {
    fn from(value: Report) -> Self {
        FieldValue::Nested(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<(String, FieldValue)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.push((label.into(), value.into()));
    }

    pub fn entries(&self) -> &[(String, FieldValue)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render a report to `out`, one `key: value` line per field. Absent values
/// print as `null`; nested reports print their key as a header line and
/// recurse without indentation.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    for (label, value) in report.entries() {
        match value {
            FieldValue::Absent => writeln!(out, "{label}: null")?,
            FieldValue::Text(s) => writeln!(out, "{label}: {s}")?,
            FieldValue::Count(n) => writeln!(out, "{label}: {n}")?,
            FieldValue::Flag(b) => writeln!(out, "{label}: {b}")?,
            FieldValue::List(items) => writeln!(out, "{label}: [{}]", items.join(", "))?,
            FieldValue::Nested(inner) => {
                writeln!(out, "{label}:")?;
                write_report(out, inner)?;
            }
        }
    }
    Ok(())
}
