//! Decoded message records: the dynamic output of the converter.
//!
//! Field order matters to readers and mirrors the catalogue's field order,
//! so records keep an ordered list of (name, value) pairs rather than a map.
use std::fmt;

use crate::core::FieldValue;

//==================================================================================RECORD

/// Ordered (field name, decoded value) pairs for one message or one
/// repeating-group iteration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedRecord {
    entries: Vec<(String, FieldValue)>,
}

impl DecodedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoded field. Order of insertion is preserved.
    pub fn push(&mut self, name: &str, value: FieldValue) {
        self.entries.push((name.to_owned(), value));
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//==================================================================================MESSAGE

/// One fully decoded message: header attributes, the top-level field record,
/// and up to two repeating-group lists under their well-known keys.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    pub timestamp: f64,
    pub priority: u8,
    pub source: u8,
    pub destination: u8,
    pub pgn: u32,
    /// Description of the resolved catalogue definition.
    pub description: &'static str,
    pub fields: DecodedRecord,
    /// First repeating group, one record per iteration.
    pub list: Vec<DecodedRecord>,
    /// Second repeating group.
    pub list2: Vec<DecodedRecord>,
}

impl fmt::Display for DecodedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3} {} {} -> {} {}:",
            self.timestamp, self.priority, self.source, self.destination, self.description
        )?;
        for (name, value) in self.fields.iter() {
            write!(f, " {name} = ")?;
            format_value(f, value)?;
            write!(f, ";")?;
        }
        for (key, list) in [("list", &self.list), ("list2", &self.list2)] {
            for (index, record) in list.iter().enumerate() {
                write!(f, " {key}[{index}]:")?;
                for (name, value) in record.iter() {
                    write!(f, " {name} = ")?;
                    format_value(f, value)?;
                    write!(f, ";")?;
                }
            }
        }
        Ok(())
    }
}

fn format_value(f: &mut fmt::Formatter<'_>, value: &FieldValue) -> fmt::Result {
    match value {
        FieldValue::Unsigned(v) => write!(f, "{v}"),
        FieldValue::Signed(v) => write!(f, "{v}"),
        FieldValue::Real(v) => write!(f, "{v}"),
        FieldValue::Text(text) => write!(f, "{text:?}"),
        FieldValue::Label { raw, label } => write!(f, "{label} ({raw})"),
        FieldValue::Flags { raw, labels } => write!(f, "{} ({raw:#x})", labels.join(",")),
        FieldValue::Binary(bytes) => write!(f, "{}", hex::encode(bytes)),
        // MMSI identifiers keep their leading zeros.
        FieldValue::Mmsi(v) => write!(f, "{v:09}"),
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
