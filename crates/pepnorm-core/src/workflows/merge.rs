use crate::core::io::auxiliary::{AuxiliaryTable, KEY_COLUMN};
use crate::core::models::columns::{IDENTITY_COLUMNS, PEPTIDE_ID, SMILES};
use crate::core::models::table::Table;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::join::{DatasetJoiner, Secondary};
use crate::engine::progress::ProgressReporter;
use crate::engine::report::RunSummary;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct MergeResult {
    pub table: Table,
    pub summary: RunSummary,
}

fn lipophilicity_secondary(table: &Table) -> Secondary<'_> {
    Secondary::by_column(table, PEPTIDE_ID)
        .excluding(&IDENTITY_COLUMNS)
        .excluding(&[SMILES])
}

/// Merges physicochemical and lipophilicity properties onto normalized activity rows.
///
/// Every activity row is kept once; peptides missing from a property table get
/// empty property cells.
#[instrument(skip_all, name = "unified_workflow")]
pub fn unified(
    normalized: Table,
    physchem: &Table,
    lipophilicity: Option<&Table>,
    config: &EngineConfig,
    reporter: &ProgressReporter,
) -> Result<MergeResult, EngineError> {
    reporter.stage_start("Unify", normalized.name());
    let mut secondaries = vec![Secondary::by_column(physchem, PEPTIDE_ID).excluding(&IDENTITY_COLUMNS)];
    match lipophilicity {
        Some(table) => secondaries.push(lipophilicity_secondary(table)),
        None => info!("No lipophilicity table; continuing without it."),
    }

    let mut summary = RunSummary::new(normalized.len());
    let (table, outcomes) = DatasetJoiner::new(&config.keys).join(normalized, &secondaries)?;
    summary.joins = outcomes;
    reporter.stage_finish(summary.tally());

    info!(
        "Unified table has {} rows and {} columns.",
        table.len(),
        table.width()
    );
    summary.log("unify");
    Ok(MergeResult { table, summary })
}

/// Merges the sequence-intrinsic properties of each peptide: physicochemical values,
/// lipophilicity and auxiliary membrane scalars.
///
/// The auxiliary table is matched on the sequence key encoded from each physchem row.
#[instrument(skip_all, name = "intrinsic_workflow")]
pub fn intrinsic(
    physchem: Table,
    lipophilicity: Option<&Table>,
    auxiliary: Option<&AuxiliaryTable>,
    config: &EngineConfig,
    reporter: &ProgressReporter,
) -> Result<MergeResult, EngineError> {
    reporter.stage_start("Intrinsic", physchem.name());
    let auxiliary_table = auxiliary.map(AuxiliaryTable::to_table);

    let mut secondaries = Vec::new();
    if let Some(table) = lipophilicity {
        secondaries.push(lipophilicity_secondary(table));
    }
    if let Some(table) = &auxiliary_table {
        secondaries.push(Secondary::by_sequence_key(table, KEY_COLUMN));
    }

    let mut summary = RunSummary::new(physchem.len());
    let (table, outcomes) = DatasetJoiner::new(&config.keys).join(physchem, &secondaries)?;
    if auxiliary_table.is_some() {
        if let Some(outcome) = outcomes.last() {
            summary.key_failures = outcome.key_failures.len();
            summary.lookup_misses = outcome.missed.saturating_sub(outcome.key_failures.len());
        }
    }
    summary.joins = outcomes;
    reporter.stage_finish(summary.tally());

    summary.log("intrinsic");
    Ok(MergeResult { table, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::auxiliary::{AuxiliaryEntry, Scalar};
    use crate::core::models::columns::{C_TERMINUS, LOG_D, LOG_P, N_TERMINUS, SEQUENCE};
    use crate::engine::config::tests::default_config;

    fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(name, columns.iter().copied());
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        table
    }

    fn physchem() -> Table {
        table(
            "physchem",
            &[PEPTIDE_ID, N_TERMINUS, SEQUENCE, C_TERMINUS, "Net Charge"],
            &[
                &["1", "C16", "KLK", "AMD", "1"],
                &["2", "C12", "GIG", "", "-1"],
            ],
        )
    }

    fn lipophilicity() -> Table {
        table(
            "lipophilicity",
            &[PEPTIDE_ID, N_TERMINUS, SEQUENCE, SMILES, LOG_P, LOG_D],
            &[&["2", "C12", "GIG", "CC(=O)", "0.5", "-2.1"]],
        )
    }

    #[test]
    fn unified_appends_property_columns_after_activity_columns() {
        let normalized = table(
            "activity_normalized",
            &[PEPTIDE_ID, SEQUENCE, "active"],
            &[&["1", "KLK", "1"], &["2", "GIG", "0"], &["2", "GIG", "1"], &["3", "WW", "0"]],
        );
        let result = unified(
            normalized,
            &physchem(),
            Some(&lipophilicity()),
            &default_config(),
            &ProgressReporter::new(),
        )
        .unwrap();
        let joined = &result.table;

        assert_eq!(joined.len(), 4);
        assert_eq!(
            joined.columns(),
            &[PEPTIDE_ID, SEQUENCE, "active", "Net Charge", LOG_P, LOG_D]
        );
        assert_eq!(joined.cell(0, "Net Charge"), "1");
        assert_eq!(joined.cell(0, LOG_D), "");
        assert_eq!(joined.cell(2, LOG_D), "-2.1");
        assert_eq!(joined.cell(3, "Net Charge"), "");
        assert_eq!(result.summary.joins[0].matched, 3);
    }

    #[test]
    fn unified_without_lipophilicity_uses_physchem_only() {
        let normalized = table("n", &[PEPTIDE_ID], &[&["1"]]);
        let result = unified(normalized, &physchem(), None, &default_config(), &ProgressReporter::new())
            .unwrap();
        assert_eq!(result.table.columns(), &[PEPTIDE_ID, "Net Charge"]);
        assert_eq!(result.summary.joins.len(), 1);
    }

    #[test]
    fn unified_requires_peptide_id_in_physchem() {
        let normalized = table("n", &[PEPTIDE_ID], &[&["1"]]);
        let broken = table("physchem", &["id"], &[]);
        let result = unified(normalized, &broken, None, &default_config(), &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Schema { .. })));
    }

    #[test]
    fn intrinsic_joins_auxiliary_by_sequence_key() {
        let mut auxiliary = AuxiliaryTable::default();
        auxiliary.insert(
            "ZZZZKLK00".to_string(),
            AuxiliaryEntry {
                curv_min: Scalar::parse("0.75"),
                ..AuxiliaryEntry::default()
            },
        );
        let result = intrinsic(
            physchem(),
            Some(&lipophilicity()),
            Some(&auxiliary),
            &default_config(),
            &ProgressReporter::new(),
        )
        .unwrap();
        let joined = &result.table;

        assert_eq!(joined.len(), 2);
        assert_eq!(joined.cell(0, "curv_min"), "0.75");
        assert_eq!(joined.cell(1, "curv_min"), "");
        assert_eq!(joined.cell(1, LOG_P), "0.5");
        assert_eq!(result.summary.lookup_misses, 1);
        assert_eq!(result.summary.key_failures, 0);
    }

    #[test]
    fn intrinsic_without_optional_tables_returns_physchem() {
        let result = intrinsic(physchem(), None, None, &default_config(), &ProgressReporter::new())
            .unwrap();
        assert_eq!(result.table, physchem());
        assert!(result.summary.joins.is_empty());
    }
}
