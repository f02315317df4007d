//! Raw card dataset loading.
//!
//! The dataset is a JSON object mapping card codes to attribute records. Key
//! order is significant (it becomes the default deck order), so the raw deck
//! keeps its entries in the order they were read.

use crate::config;
use crate::error::{Result, TarotError};
use crate::models::RawCardRecord;
use flate2::read::GzDecoder;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

/// Ordered mapping of card code to raw record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDeck {
    entries: Vec<(String, RawCardRecord)>,
    index: HashMap<String, usize>,
}

impl RawDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Re-inserting an existing code replaces its record but
    /// keeps its original position. Returns the replaced record, if any.
    pub fn insert(&mut self, code: impl Into<String>, record: RawCardRecord) -> Option<RawCardRecord> {
        let code = code.into();
        if let Some(&pos) = self.index.get(&code) {
            return Some(std::mem::replace(&mut self.entries[pos].1, record));
        }
        self.index.insert(code.clone(), self.entries.len());
        self.entries.push((code, record));
        None
    }

    /// Build a deck from an already-parsed JSON value.
    ///
    /// The value must be an object whose values are themselves objects.
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(TarotError::InvalidDataset(format!(
                    "expected a JSON object of card records, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut deck = RawDeck::new();
        for (code, record) in map {
            match record {
                Value::Object(record) => {
                    deck.insert(code, record);
                }
                other => {
                    return Err(TarotError::InvalidDataset(format!(
                        "record for '{}' must be a JSON object, found {}",
                        code,
                        json_kind(&other)
                    )))
                }
            }
        }
        Ok(deck)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Load a dataset file (handles `.gz` transparently).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);

        let deck = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let decoder = GzDecoder::new(reader);
            Self::from_reader(BufReader::new(decoder))?
        } else {
            Self::from_reader(reader)?
        };

        log::debug!("loaded {} card records from {}", deck.len(), path.display());
        Ok(deck)
    }

    /// The 78-card dataset that ships with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(config::BUNDLED_DECK_JSON)
    }

    pub fn get(&self, code: &str) -> Option<&RawCardRecord> {
        self.index.get(code).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(code, record)` pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawCardRecord)> + '_ {
        self.entries
            .iter()
            .map(|(code, record)| (code.as_str(), record))
    }

    /// Card codes in dataset order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(code, _)| code.as_str())
    }
}

impl FromIterator<(String, RawCardRecord)> for RawDeck {
    fn from_iter<I: IntoIterator<Item = (String, RawCardRecord)>>(iter: I) -> Self {
        let mut deck = RawDeck::new();
        for (code, record) in iter {
            deck.insert(code, record);
        }
        deck
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_existing_code_keeps_position() {
        let mut deck = RawDeck::new();
        deck.insert("W-01", RawCardRecord::new());
        deck.insert("C-01", RawCardRecord::new());

        let mut replacement = RawCardRecord::new();
        replacement.insert("name".into(), Value::from("Ace of Wands"));
        assert!(deck.insert("W-01", replacement).is_some());

        let codes: Vec<&str> = deck.codes().collect();
        assert_eq!(codes, vec!["W-01", "C-01"]);
        assert_eq!(deck.get("W-01").unwrap()["name"], "Ace of Wands");
    }

    #[test]
    fn json_key_order_is_preserved() {
        let deck = RawDeck::from_json_str(r#"{"S-KING": {}, "MAJ-00": {}, "C-03": {}}"#).unwrap();
        let codes: Vec<&str> = deck.codes().collect();
        assert_eq!(codes, vec!["S-KING", "MAJ-00", "C-03"]);
    }
}
