use crate::core::chemistry::key::KeyScheme;
use crate::core::models::columns::{C_TERMINUS, N_TERMINUS, SEQUENCE};
use crate::core::models::table::{SchemaError, Table};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// How the join key of a primary row is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyExtractor {
    /// The trimmed value of a column.
    Column(String),
    /// A [`SequenceKey`](crate::core::chemistry::key::SequenceKey) encoded from three columns.
    SequenceKey {
        n_terminus: String,
        sequence: String,
        c_terminus: String,
    },
}

impl KeyExtractor {
    fn source_columns(&self) -> Vec<&str> {
        match self {
            KeyExtractor::Column(column) => vec![column.as_str()],
            KeyExtractor::SequenceKey {
                n_terminus,
                sequence,
                c_terminus,
            } => vec![n_terminus.as_str(), sequence.as_str(), c_terminus.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRule {
    pub primary: KeyExtractor,
    pub secondary_column: String,
}

/// A table merged into the primary, with its key rule and the columns it contributes.
#[derive(Debug, Clone)]
pub struct Secondary<'a> {
    pub table: &'a Table,
    pub rule: KeyRule,
    pub columns: Vec<String>,
}

impl<'a> Secondary<'a> {
    /// Matches `column` in the primary against the same column here. Every other
    /// column of `table` is contributed.
    pub fn by_column(table: &'a Table, column: &str) -> Self {
        Self::with_rule(
            table,
            KeyRule {
                primary: KeyExtractor::Column(column.to_string()),
                secondary_column: column.to_string(),
            },
        )
    }

    /// Matches a sequence key encoded from the primary's identity columns against
    /// `key_column` here.
    pub fn by_sequence_key(table: &'a Table, key_column: &str) -> Self {
        Self::with_rule(
            table,
            KeyRule {
                primary: KeyExtractor::SequenceKey {
                    n_terminus: N_TERMINUS.to_string(),
                    sequence: SEQUENCE.to_string(),
                    c_terminus: C_TERMINUS.to_string(),
                },
                secondary_column: key_column.to_string(),
            },
        )
    }

    pub fn with_rule(table: &'a Table, rule: KeyRule) -> Self {
        let columns = table
            .columns()
            .iter()
            .filter(|c| **c != rule.secondary_column)
            .cloned()
            .collect();
        Self {
            table,
            rule,
            columns,
        }
    }

    /// Drops the named columns from the contributed set.
    pub fn excluding(mut self, names: &[&str]) -> Self {
        self.columns.retain(|c| !names.contains(&c.as_str()));
        self
    }

    fn index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::new();
        let Some(position) = self.table.column_index(&self.rule.secondary_column) else {
            return index;
        };
        for (row, cells) in self.table.rows().iter().enumerate() {
            let key = cells[position].trim();
            if !key.is_empty() {
                // A repeated key resolves to its last row.
                index.insert(key, row);
            }
        }
        index
    }
}

/// Match statistics of one secondary table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    pub table: String,
    pub matched: usize,
    pub missed: usize,
    /// Primary rows whose sequence key could not be encoded.
    pub key_failures: Vec<usize>,
}

/// Left-joins secondary tables onto a primary table.
///
/// The output keeps every primary row exactly once. Each secondary's columns are
/// appended in declaration order; a column already present keeps its position and
/// is overwritten on a match and emptied on a miss.
pub struct DatasetJoiner<'a> {
    keys: &'a KeyScheme,
}

impl<'a> DatasetJoiner<'a> {
    pub fn new(keys: &'a KeyScheme) -> Self {
        Self { keys }
    }

    fn validate(&self, primary: &Table, secondary: &Secondary<'_>) -> Result<(), SchemaError> {
        for column in secondary.rule.primary.source_columns() {
            primary.require_column(column)?;
        }
        secondary
            .table
            .require_column(&secondary.rule.secondary_column)?;
        for column in &secondary.columns {
            secondary.table.require_column(column)?;
        }
        Ok(())
    }

    fn primary_keys(&self, primary: &Table, extractor: &KeyExtractor) -> (Vec<Option<String>>, Vec<usize>) {
        let mut failures = Vec::new();
        let keys = (0..primary.len())
            .map(|row| match extractor {
                KeyExtractor::Column(column) => {
                    Some(primary.cell(row, column).trim().to_string()).filter(|k| !k.is_empty())
                }
                KeyExtractor::SequenceKey {
                    n_terminus,
                    sequence,
                    c_terminus,
                } => match self.keys.encode(
                    primary.cell(row, n_terminus),
                    primary.cell(row, sequence),
                    primary.cell(row, c_terminus),
                ) {
                    Ok(key) => Some(key.into_string()),
                    Err(e) => {
                        warn!("Row {} of '{}': {}", row + 1, primary.name(), e);
                        failures.push(row);
                        None
                    }
                },
            })
            .collect();
        (keys, failures)
    }

    /// Joins every secondary onto `primary`, in order.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if a key column or declared column is missing from
    /// its table. Nothing is joined in that case.
    pub fn join(
        &self,
        primary: Table,
        secondaries: &[Secondary<'_>],
    ) -> Result<(Table, Vec<JoinOutcome>), SchemaError> {
        for secondary in secondaries {
            self.validate(&primary, secondary)?;
        }

        // Keys come from the primary as given, before any secondary columns land.
        let keyed: Vec<_> = secondaries
            .iter()
            .map(|s| self.primary_keys(&primary, &s.rule.primary))
            .collect();

        let mut output = primary;
        let mut outcomes = Vec::with_capacity(secondaries.len());

        for (secondary, (keys, key_failures)) in secondaries.iter().zip(keyed) {
            let index = secondary.index();
            let sources: Vec<usize> = secondary
                .columns
                .iter()
                .filter_map(|c| secondary.table.column_index(c))
                .collect();
            let targets: Vec<usize> = secondary
                .columns
                .iter()
                .map(|c| output.add_column(c.as_str()))
                .collect();

            let mut outcome = JoinOutcome {
                table: secondary.table.name().to_string(),
                key_failures,
                ..JoinOutcome::default()
            };
            let source_rows = secondary.table.rows();

            for (row, key) in output.rows_mut().iter_mut().zip(&keys) {
                let hit = key.as_deref().and_then(|k| index.get(k).copied());
                match hit {
                    Some(source_row) => {
                        outcome.matched += 1;
                        let cells = &source_rows[source_row];
                        for (&source, &target) in sources.iter().zip(&targets) {
                            row[target] = cells[source].clone();
                        }
                    }
                    None => {
                        outcome.missed += 1;
                        if let Some(k) = key {
                            debug!("No row keyed '{}' in '{}'", k, outcome.table);
                        }
                        for &target in &targets {
                            row[target].clear();
                        }
                    }
                }
            }

            info!(
                "Joined '{}': {} matched, {} missed",
                outcome.table, outcome.matched, outcome.missed
            );
            outcomes.push(outcome);
        }

        Ok((output, outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::columns::PEPTIDE_ID;

    fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(name, columns.iter().copied());
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        table
    }

    fn activity() -> Table {
        table(
            "activity",
            &[PEPTIDE_ID, N_TERMINUS, SEQUENCE, C_TERMINUS, "unit"],
            &[
                &["1", "C16", "klk", "AMD", "µM"],
                &["2", "C16", "GIG", "", "nM"],
                &["1", "C16", "klk", "AMD", "mM"],
                &["", "Ac", "WWW", "", ""],
            ],
        )
    }

    #[test]
    fn join_by_identifier_keeps_every_primary_row() {
        let keys = KeyScheme::default();
        let physchem = table(
            "physchem",
            &[PEPTIDE_ID, SEQUENCE, "Net Charge"],
            &[&["1", "KLK", "3"], &["9", "AAA", "0"]],
        );
        let secondary = Secondary::by_column(&physchem, PEPTIDE_ID).excluding(&[SEQUENCE]);
        let (joined, outcomes) = DatasetJoiner::new(&keys)
            .join(activity(), &[secondary])
            .unwrap();

        assert_eq!(joined.len(), 4);
        assert_eq!(joined.columns().last().unwrap(), "Net Charge");
        let charges: Vec<_> = (0..4).map(|r| joined.cell(r, "Net Charge")).collect();
        assert_eq!(charges, vec!["3", "", "3", ""]);
        assert_eq!(outcomes[0].matched, 2);
        assert_eq!(outcomes[0].missed, 2);
    }

    #[test]
    fn join_by_sequence_key_encodes_primary_rows() {
        let keys = KeyScheme::default();
        let aux = table(
            "list_min",
            &["sequence", "curv_min", "npol_min"],
            &[&["ZZZZKLK00", "-0.5", "0.2"], &["ZZZZGIG01", "0.1", ""]],
        );
        let (joined, outcomes) = DatasetJoiner::new(&keys)
            .join(activity(), &[Secondary::by_sequence_key(&aux, "sequence")])
            .unwrap();

        assert_eq!(joined.cell(0, "curv_min"), "-0.5");
        assert_eq!(joined.cell(1, "curv_min"), "0.1");
        assert_eq!(joined.cell(1, "npol_min"), "");
        assert_eq!(joined.cell(3, "curv_min"), "");
        assert!(!joined.has_column("sequence"));
        assert_eq!(outcomes[0].key_failures, vec![3]);
        assert_eq!(outcomes[0].matched, 3);
    }

    #[test]
    fn repeated_secondary_key_resolves_to_last_row() {
        let keys = KeyScheme::default();
        let lipo = table(
            "lipophilicity",
            &[PEPTIDE_ID, "logD"],
            &[&["2", "-1.0"], &["2", "-2.0"]],
        );
        let (joined, _) = DatasetJoiner::new(&keys)
            .join(activity(), &[Secondary::by_column(&lipo, PEPTIDE_ID)])
            .unwrap();
        assert_eq!(joined.cell(1, "logD"), "-2.0");
    }

    #[test]
    fn overlapping_column_keeps_position_and_is_emptied_on_miss() {
        let keys = KeyScheme::default();
        let units = table("units", &[PEPTIDE_ID, "unit"], &[&["2", "ng/mL"]]);
        let (joined, _) = DatasetJoiner::new(&keys)
            .join(activity(), &[Secondary::by_column(&units, PEPTIDE_ID)])
            .unwrap();

        assert_eq!(joined.width(), 5);
        assert_eq!(joined.column_index("unit"), Some(4));
        assert_eq!(joined.cell(0, "unit"), "");
        assert_eq!(joined.cell(1, "unit"), "ng/mL");
    }

    #[test]
    fn matched_rows_are_fully_populated_and_missed_rows_fully_empty() {
        let keys = KeyScheme::default();
        let physchem = table(
            "physchem",
            &[PEPTIDE_ID, "a", "b"],
            &[&["1", "x", "y"], &["2", "z", "w"]],
        );
        let (joined, _) = DatasetJoiner::new(&keys)
            .join(activity(), &[Secondary::by_column(&physchem, PEPTIDE_ID)])
            .unwrap();
        for row in 0..joined.len() {
            let a = joined.cell(row, "a").is_empty();
            let b = joined.cell(row, "b").is_empty();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn secondaries_append_columns_in_merge_order() {
        let keys = KeyScheme::default();
        let first = table("first", &[PEPTIDE_ID, "x", "shared"], &[]);
        let second = table("second", &[PEPTIDE_ID, "shared", "y"], &[]);
        let (joined, outcomes) = DatasetJoiner::new(&keys)
            .join(
                activity(),
                &[
                    Secondary::by_column(&first, PEPTIDE_ID),
                    Secondary::by_column(&second, PEPTIDE_ID),
                ],
            )
            .unwrap();
        let tail: Vec<_> = joined.columns()[5..].to_vec();
        assert_eq!(tail, vec!["x", "shared", "y"]);
        assert_eq!(outcomes.len(), 2);
    }

    #[test]
    fn missing_key_column_is_a_schema_error() {
        let keys = KeyScheme::default();
        let broken = table("broken", &["id", "logD"], &[]);
        let result = DatasetJoiner::new(&keys).join(
            activity(),
            &[Secondary::by_column(&broken, PEPTIDE_ID)],
        );
        assert_eq!(
            result.unwrap_err(),
            SchemaError::MissingColumn {
                table: "broken".into(),
                column: PEPTIDE_ID.into()
            }
        );
    }
}
