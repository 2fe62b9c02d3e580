use super::traits::{TableError, TabularFile};
use crate::core::models::table::{SchemaError, Table};
use std::io::{BufRead, Write};

/// Tables whose fields are separated by runs of spaces or tabs.
///
/// Blank lines are skipped. Short lines leave their trailing cells empty.
pub struct WhitespaceTable;

impl TabularFile for WhitespaceTable {
    type Error = TableError;

    fn read_from(reader: &mut impl BufRead, name: &str) -> Result<Table, Self::Error> {
        let mut lines = reader.lines();
        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    let line = line.trim_start_matches('\u{feff}');
                    if !line.trim().is_empty() {
                        break line.to_string();
                    }
                }
                None => {
                    return Err(SchemaError::MissingHeader {
                        table: name.to_string(),
                    }
                    .into());
                }
            }
        };

        let mut table = Table::new(name, header.split_whitespace());
        let positions: Vec<usize> = header
            .split_whitespace()
            .map(|h| table.add_column(h))
            .collect();

        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut row = vec![String::new(); table.width()];
            for (cell, &position) in line.split_whitespace().zip(&positions) {
                row[position] = cell.to_string();
            }
            table.push_row(row);
        }
        Ok(table)
    }

    fn write_to(table: &Table, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", table.columns().join("\t"))?;
        for row in table.rows() {
            writeln!(writer, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}
