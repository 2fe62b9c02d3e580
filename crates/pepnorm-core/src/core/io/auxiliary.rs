use super::traits::{TableError, TabularFile};
use super::whitespace::WhitespaceTable;
use crate::core::chemistry::key::SequenceKey;
use crate::core::models::table::{SchemaError, Table};
use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{debug, warn};

/// Token used in auxiliary files for a value that was not computed.
pub const MISSING_SENTINEL: &str = "NA";

pub const KEY_COLUMN: &str = "sequence";

/// Name of the table produced by [`AuxiliaryTable::to_table`].
pub const TABLE_NAME: &str = "auxiliary";

/// Header names required in an auxiliary file, in file order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    KEY_COLUMN, "npol_min", "curv_min", "pH", "npol_c0", "npol_c1", "npol_c2",
];

/// Columns contributed by an auxiliary entry when joined, in output order.
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "curv_min", "npol_min", "ph_run", "npol_c0", "npol_c1", "npol_c2",
];

/// A numeric auxiliary value that remembers the token it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    value: f64,
    text: String,
}

impl Scalar {
    /// Parses a finite number. The trimmed token is kept for output.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self {
            value,
            text: text.to_string(),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Precomputed membrane-interaction scalars for one sequence key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxiliaryEntry {
    pub curv_min: Option<Scalar>,
    pub npol_min: Option<Scalar>,
    pub ph: Option<Scalar>,
    pub npol_c0: Option<Scalar>,
    pub npol_c1: Option<Scalar>,
    pub npol_c2: Option<Scalar>,
}

impl AuxiliaryEntry {
    /// Values in [`OUTPUT_COLUMNS`] order, as written in the source file.
    /// Absent values render as empty cells.
    pub fn cells(&self) -> [String; 6] {
        [
            &self.curv_min,
            &self.npol_min,
            &self.ph,
            &self.npol_c0,
            &self.npol_c1,
            &self.npol_c2,
        ]
        .map(|value| {
            value
                .as_ref()
                .map(|v| v.as_str().to_string())
                .unwrap_or_default()
        })
    }
}

/// Read-only lookup of auxiliary entries, keyed by [`SequenceKey`] text.
#[derive(Debug, Clone, Default)]
pub struct AuxiliaryTable {
    keys: Vec<String>,
    entries: HashMap<String, AuxiliaryEntry>,
}

impl AuxiliaryTable {
    /// Reads an auxiliary file. Missing required columns give an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures while reading.
    pub fn read_from(reader: &mut impl BufRead, name: &str) -> Result<Self, TableError> {
        match WhitespaceTable::read_from(reader, name) {
            Ok(table) => Ok(Self::from_table(&table)),
            Err(TableError::Schema(e)) => {
                warn!("{}; auxiliary data disabled", e);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Loads an auxiliary file from disk. A missing file gives an empty table.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        match WhitespaceTable::read_from_path(path) {
            Ok(table) => Ok(Self::from_table(&table)),
            Err(TableError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Auxiliary file not found: {}", path.display());
                Ok(Self::default())
            }
            Err(TableError::Schema(e)) => {
                warn!("{}; auxiliary data disabled", e);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Builds the lookup from a parsed table. Later rows replace earlier rows with the same key.
    pub fn from_table(table: &Table) -> Self {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !table.has_column(column))
            .collect();
        if !missing.is_empty() {
            let error = SchemaError::MissingColumn {
                table: table.name().to_string(),
                column: missing.join(", "),
            };
            warn!("{}; auxiliary data disabled", error);
            return Self::default();
        }

        let mut lookup = Self::default();
        for row in 0..table.len() {
            let key = table.cell(row, KEY_COLUMN);
            if key.is_empty() {
                continue;
            }
            let value = |column: &str| numeric_cell(table.cell(row, column), key, column);
            let entry = AuxiliaryEntry {
                curv_min: value("curv_min"),
                npol_min: value("npol_min"),
                ph: value("pH"),
                npol_c0: value("npol_c0"),
                npol_c1: value("npol_c1"),
                npol_c2: value("npol_c2"),
            };
            lookup.insert(key.to_string(), entry);
        }
        debug!("Loaded {} auxiliary entries from '{}'", lookup.len(), table.name());
        lookup
    }

    pub fn insert(&mut self, key: String, entry: AuxiliaryEntry) {
        if self.entries.insert(key.clone(), entry).is_none() {
            self.keys.push(key);
        }
    }

    pub fn get(&self, key: &SequenceKey) -> Option<&AuxiliaryEntry> {
        self.entries.get(key.as_str())
    }

    pub fn get_str(&self, key: &str) -> Option<&AuxiliaryEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the lookup as a table keyed by `sequence`, in first-seen key order.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            TABLE_NAME,
            std::iter::once(KEY_COLUMN).chain(OUTPUT_COLUMNS),
        );
        for key in &self.keys {
            if let Some(entry) = self.entries.get(key) {
                let mut row = vec![key.clone()];
                row.extend(entry.cells());
                table.push_row(row);
            }
        }
        table
    }
}

fn numeric_cell(text: &str, key: &str, column: &str) -> Option<Scalar> {
    if text.is_empty() || text == MISSING_SENTINEL {
        return None;
    }
    let scalar = Scalar::parse(text);
    if scalar.is_none() {
        warn!("Non-numeric {} '{}' for auxiliary key {}", column, text, key);
    }
    scalar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
sequence npol_min curv_min pH npol_c0 npol_c1 npol_c2
ZZZZKLK00 0.25 -0.5 7.0 1 2 3
ZZZZGIG01 NA 0.1 NA 4 5
";

    fn sample() -> AuxiliaryTable {
        AuxiliaryTable::read_from(&mut Cursor::new(SAMPLE.as_bytes()), "list_min").unwrap()
    }

    #[test]
    fn entries_are_keyed_by_sequence_key() {
        let lookup = sample();
        assert_eq!(lookup.len(), 2);
        let entry = lookup.get_str("ZZZZKLK00").unwrap();
        assert_eq!(entry.curv_min.as_ref().map(Scalar::value), Some(-0.5));
        assert_eq!(entry.npol_min.as_ref().map(Scalar::value), Some(0.25));
        assert_eq!(entry.ph.as_ref().map(Scalar::value), Some(7.0));
    }

    #[test]
    fn sentinel_and_short_lines_become_none() {
        let entry = sample().get_str("ZZZZGIG01").unwrap().clone();
        assert_eq!(entry.npol_min, None);
        assert_eq!(entry.ph, None);
        assert_eq!(entry.npol_c1.as_ref().map(Scalar::value), Some(5.0));
        assert_eq!(entry.npol_c2, None);
        assert_eq!(entry.cells(), ["0.1", "", "", "4", "5", ""].map(String::from));
    }

    #[test]
    fn missing_required_column_gives_empty_lookup() {
        let data = "sequence npol_min curv_min\nZZZZKLK00 1 2\n";
        let lookup = AuxiliaryTable::read_from(&mut Cursor::new(data.as_bytes()), "t").unwrap();
        assert!(lookup.is_empty());
    }

    #[test]
    fn missing_file_gives_empty_lookup() {
        let dir = tempdir().unwrap();
        let lookup = AuxiliaryTable::load(&dir.path().join("list_min.txt")).unwrap();
        assert!(lookup.is_empty());
    }

    #[test]
    fn to_table_uses_output_column_order() {
        let table = sample().to_table();
        assert_eq!(
            table.columns(),
            &["sequence", "curv_min", "npol_min", "ph_run", "npol_c0", "npol_c1", "npol_c2"]
        );
        assert_eq!(table.cell(0, "sequence"), "ZZZZKLK00");
        assert_eq!(table.cell(0, "ph_run"), "7.0");
    }

    #[test]
    fn cells_keep_the_source_tokens() {
        let data = "sequence npol_min curv_min pH npol_c0 npol_c1 npol_c2
                    ZZZZKLK00 1.50 -2.5e-07 7.0 0.000001 1E3 abc
";
        let lookup = AuxiliaryTable::read_from(&mut Cursor::new(data.as_bytes()), "t").unwrap();
        let entry = lookup.get_str("ZZZZKLK00").unwrap();
        assert_eq!(
            entry.cells(),
            ["-2.5e-07", "1.50", "7.0", "0.000001", "1E3", ""].map(String::from)
        );
        assert_eq!(entry.npol_c1.as_ref().map(Scalar::value), Some(1000.0));
    }
}
