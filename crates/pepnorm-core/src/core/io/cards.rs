use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Expected a peptide card object or array in '{path}'")]
    UnexpectedShape { path: String },
}

/// A peptide record as returned by the peptide database, already fetched to disk.
///
/// Fields are kept loosely typed: the source mixes numbers, strings, `null` and
/// nested `{ "name": ... }` objects for the same keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeptideCard {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub sequence: Value,
    #[serde(default)]
    pub n_terminus: Value,
    #[serde(default)]
    pub c_terminus: Value,
    #[serde(default)]
    pub physico_chemical_properties: Value,
    #[serde(default)]
    pub target_activities: Value,
    #[serde(default)]
    pub activity_against_target_species: Value,
    #[serde(default)]
    pub unusual_amino_acids: Value,
}

impl PeptideCard {
    pub fn id_text(&self) -> String {
        value_text(&self.id)
    }

    pub fn sequence_text(&self) -> String {
        value_text(&self.sequence)
    }

    pub fn n_terminus_name(&self) -> String {
        name_of(&self.n_terminus)
    }

    pub fn c_terminus_name(&self) -> String {
        name_of(&self.c_terminus)
    }

    /// `(name, value)` pairs of the physicochemical properties, trimmed.
    pub fn properties(&self) -> Vec<(String, String)> {
        let Some(items) = self.physico_chemical_properties.as_array() else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(Value::as_object)
            .map(|item| {
                let name = item.get("name").map(value_text).unwrap_or_default();
                let value = item.get("value").map(value_text).unwrap_or_default();
                (name.trim().to_string(), value.trim().to_string())
            })
            .collect()
    }

    /// Activity records; `targetActivities` takes precedence when present.
    pub fn activities(&self) -> Vec<&Map<String, Value>> {
        let source = if self.target_activities.is_null() {
            &self.activity_against_target_species
        } else {
            &self.target_activities
        };
        source
            .as_array()
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    /// Names of the unusual amino acid modifications, comma separated.
    pub fn unusual_amino_acids_text(&self) -> String {
        let Some(items) = self.unusual_amino_acids.as_array() else {
            return String::new();
        };
        items
            .iter()
            .filter_map(|item| item.get("modificationType"))
            .map(name_of)
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Renders a JSON value as a table cell. Objects flatten to their `name`.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("name") {
            Some(name) => value_text(name),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

fn name_of(value: &Value) -> String {
    match value {
        Value::Object(map) => map.get("name").map(value_text).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Reads one card or an array of cards from JSON text.
pub fn read_cards(reader: impl Read, source: &str) -> Result<Vec<PeptideCard>, CardError> {
    let json_error = |e| CardError::Json {
        path: source.to_string(),
        source: e,
    };
    let document: Value = serde_json::from_reader(reader).map_err(json_error)?;
    match document {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(json_error))
            .collect(),
        object @ Value::Object(_) => Ok(vec![serde_json::from_value(object).map_err(json_error)?]),
        _ => Err(CardError::UnexpectedShape {
            path: source.to_string(),
        }),
    }
}

/// Loads and concatenates the cards of several JSON files, in the given order.
pub fn load_cards<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PeptideCard>, CardError> {
    let mut cards = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let display = path.to_string_lossy().to_string();
        let file = std::fs::File::open(path).map_err(|e| CardError::Io {
            path: display.clone(),
            source: e,
        })?;
        cards.extend(read_cards(std::io::BufReader::new(file), &display)?);
    }
    Ok(cards)
}
