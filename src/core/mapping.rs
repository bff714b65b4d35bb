//! Ordered old → new substitution table.
//!
//! Insertion order is substitution order. Overwriting an existing key
//! replaces its value but keeps the key where it was first inserted.

use crate::error::{Error, Result};
use crate::utils::io;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Conventional name of the mapping file inside the root directory.
pub const MAPPING_FILE_NAME: &str = "Transform.json";

/// A single old → new pair, as reported in command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a flat JSON object of string → string pairs, preserving key order.
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        if !path.is_file() {
            return Err(Error::config_missing_file(display));
        }

        let content = io::read_text(path)?;
        Self::parse(&content, &display)
    }

    /// Parse mapping JSON. `source` names the origin for error details.
    pub fn parse(content: &str, source: &str) -> Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(content)
            .map_err(|e| Error::config_invalid_json(source, e))?;

        let mut mapping = Mapping::new();
        for (key, value) in object {
            let value = match value {
                Value::String(value) => value,
                other => {
                    return Err(Error::config_invalid_value(
                        key,
                        Some(other.to_string()),
                        "mapping values must be strings",
                    ))
                }
            };
            if key.is_empty() {
                return Err(Error::config_invalid_value(
                    key,
                    Some(value),
                    "mapping keys must not be empty",
                ));
            }
            mapping.insert(key, value);
        }

        Ok(mapping)
    }

    /// Insert or overwrite a single entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::validation_invalid_argument(
                "old_name",
                "Substitution keys must not be empty",
            ));
        }
        self.insert(key, value.into());
        Ok(())
    }

    fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> Vec<MappingEntry> {
        self.iter()
            .map(|(from, to)| MappingEntry {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect()
    }
}
