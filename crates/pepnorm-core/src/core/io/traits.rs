use crate::core::models::table::{SchemaError, Table};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Defines the interface for reading and writing tabular file formats.
///
/// Implementors handle format-specific parsing and serialization; the path-based
/// helpers name the resulting [`Table`] after the file stem.
pub trait TabularFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a table from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `name` - The name given to the table in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing, parsing fails or I/O fails.
    fn read_from(reader: &mut impl BufRead, name: &str) -> Result<Table, Self::Error>;

    /// Writes a table, header first, to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(table: &Table, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a table from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Table, Self::Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, &table_name(path))
    }

    /// Writes a table to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(table: &Table, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub(crate) fn table_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
