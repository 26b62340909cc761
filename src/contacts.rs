//! Contact labels - persistent label -> number map and phone normalization

use crate::config::Config;
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Persistent store for contact labels, backed by the JSON config file.
///
/// The full document is kept around so that keys other than
/// `contact_labels` survive a rewrite.
pub struct LabelStore {
    config_path: PathBuf,
    document: serde_json::Map<String, Value>,
    labels: BTreeMap<String, String>,
}

impl LabelStore {
    /// Load the label store from the config file.
    ///
    /// A missing file is an empty store. Entries whose value is not a
    /// non-empty string are dropped from the label view but left in the
    /// document untouched.
    pub fn load(config: &Config) -> Result<Self> {
        let config_path = config.config_path.clone();

        let document = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| {
                Error::Config(format!("Unable to read config at {}: {}", config_path.display(), e))
            })?;
            let value: Value = serde_json::from_str(&content).map_err(|e| {
                Error::Config(format!("Unable to read config at {}: {}", config_path.display(), e))
            })?;
            match value {
                Value::Object(map) => map,
                Value::Null => serde_json::Map::new(),
                _ => {
                    return Err(Error::Config(
                        "Config file must contain a JSON object.".to_string(),
                    ))
                }
            }
        } else {
            serde_json::Map::new()
        };

        let labels = clean_labels(&document)?;

        Ok(Self {
            config_path,
            document,
            labels,
        })
    }

    /// Resolve a target through the label map: exact-key match uses the
    /// mapped number, anything else passes through unchanged.
    pub fn resolve<'a>(&'a self, target: &'a str) -> &'a str {
        self.labels.get(target).map(String::as_str).unwrap_or(target)
    }

    /// Save a label and persist immediately.
    pub fn add_label(&mut self, label: &str, number: &str) -> Result<()> {
        let label = label.trim();
        let number = number.trim();
        if label.is_empty() {
            return Err(Error::Config("Label cannot be empty.".to_string()));
        }
        if number.is_empty() {
            return Err(Error::Config("Number cannot be empty.".to_string()));
        }

        let entry = self
            .document
            .entry("contact_labels".to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        match entry {
            Value::Object(map) => {
                map.insert(label.to_string(), Value::String(number.to_string()));
            }
            _ => {
                return Err(Error::Config(
                    "contact_labels must be a JSON object.".to_string(),
                ))
            }
        }

        self.labels.insert(label.to_string(), number.to_string());
        self.save()
    }

    /// Write the document back atomically (temp file + rename)
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let parent = self
            .config_path
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let mut temp = NamedTempFile::new_in(parent)?;

        let mut json = serde_json::to_string_pretty(&self.document)?;
        json.push('\n');
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;

        temp.persist(&self.config_path)
            .map_err(|e| Error::Io(e.error))?;

        Ok(())
    }

    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Extract the usable label entries from the config document.
fn clean_labels(document: &serde_json::Map<String, Value>) -> Result<BTreeMap<String, String>> {
    let mut cleaned = BTreeMap::new();
    match document.get("contact_labels") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (key, value) in map {
                if let Value::String(number) = value {
                    if !number.trim().is_empty() {
                        cleaned.insert(key.clone(), number.clone());
                    }
                }
            }
        }
        Some(_) => {
            return Err(Error::Config(
                "contact_labels must be a JSON object.".to_string(),
            ))
        }
    }
    Ok(cleaned)
}

/// Normalize a phone number by keeping decimal digits only.
///
/// Fails when nothing remains - the input carried no digits at all.
pub fn normalize_phone(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(Error::InvalidAddress);
    }
    Ok(digits)
}

/// Resolve a target (label or raw number) to a digits-only address.
pub fn resolve_phone(store: &LabelStore, target: &str) -> Result<String> {
    normalize_phone(store.resolve(target))
}
