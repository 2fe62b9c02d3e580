use super::traits::{TableError, TabularFile};
use crate::core::models::table::{SchemaError, Table};
use std::io::{BufRead, Write};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Comma-separated tables with a header row, as produced by spreadsheet tools.
///
/// A leading byte-order mark is accepted on read and always emitted on write.
pub struct CsvTable;

impl TabularFile for CsvTable {
    type Error = TableError;

    fn read_from(reader: &mut impl BufRead, name: &str) -> Result<Table, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(content);

        let headers = csv_reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(SchemaError::MissingHeader {
                table: name.to_string(),
            }
            .into());
        }

        let mut table = Table::new(name, headers.iter());
        // Repeated header names collapse onto one column; the rightmost cell wins.
        let positions: Vec<usize> = headers
            .iter()
            .map(|h| table.add_column(h))
            .collect();

        for record in csv_reader.records() {
            let record = record?;
            let mut row = vec![String::new(); table.width()];
            for (cell, &position) in record.iter().zip(&positions) {
                row[position] = cell.to_string();
            }
            table.push_row(row);
        }
        Ok(table)
    }

    fn write_to(table: &Table, writer: &mut impl Write) -> Result<(), Self::Error> {
        writer.write_all(UTF8_BOM)?;
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(table.columns())?;
        for row in table.rows() {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
