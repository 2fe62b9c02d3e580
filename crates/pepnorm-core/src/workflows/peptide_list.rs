use crate::core::models::columns::{C_TERMINUS, FILTERED_SEQUENCE, N_TERMINUS, SEQUENCE, TOTAL_SEQUENCE};
use crate::core::models::table::Table;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::report::RunSummary;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

pub const REQUIRED_COLUMNS: [&str; 2] = [SEQUENCE, C_TERMINUS];

/// Residue code for an unknown amino acid; keys containing it are never listed.
const UNKNOWN_RESIDUE: char = 'X';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeptideListStats {
    pub total: usize,
    pub with_unknown: usize,
    pub unique_valid: usize,
}

#[derive(Debug, Clone)]
pub struct PeptideListResult {
    pub table: Table,
    pub stats: PeptideListStats,
    pub summary: RunSummary,
}

/// Appends `total_sequence` and `filtered_sequence` to a peptide table.
///
/// `total_sequence` is the sequence key of the row. `filtered_sequence` repeats it
/// the first time a key without unknown residues appears and is empty otherwise.
/// With `n_terminus` set, every row is keyed with that label instead of its own
/// `N TERMINUS` cell.
#[instrument(skip_all, name = "peptide_list_workflow")]
pub fn run(
    peptides: Table,
    n_terminus: Option<&str>,
    config: &EngineConfig,
    reporter: &ProgressReporter,
) -> Result<PeptideListResult, EngineError> {
    for column in REQUIRED_COLUMNS {
        peptides.require_column(column)?;
    }
    if n_terminus.is_none() {
        peptides.require_column(N_TERMINUS)?;
    }

    reporter.stage_start("Peptide list", peptides.name());
    let mut table = peptides;
    let total_position = table.add_column(TOTAL_SEQUENCE);
    let filtered_position = table.add_column(FILTERED_SEQUENCE);
    let mut summary = RunSummary::new(table.len());
    let mut stats = PeptideListStats {
        total: table.len(),
        ..PeptideListStats::default()
    };
    let mut seen = HashSet::new();

    reporter.rows(table.len(), |row| {
        let label = n_terminus.unwrap_or_else(|| table.cell(row, N_TERMINUS));
        let encoded = config
            .keys
            .encode(label, table.cell(row, SEQUENCE), table.cell(row, C_TERMINUS));
        let key = match encoded {
            Ok(key) => key.into_string(),
            Err(e) => {
                warn!("Row {}: {}", row + 1, e);
                summary.key_failures += 1;
                String::new()
            }
        };

        let has_unknown = key.contains(UNKNOWN_RESIDUE);
        stats.with_unknown += usize::from(has_unknown);
        let filtered = if !key.is_empty() && !has_unknown && seen.insert(key.clone()) {
            stats.unique_valid += 1;
            key.clone()
        } else {
            String::new()
        };

        table.set_cell(row, total_position, key);
        table.set_cell(row, filtered_position, filtered);
    });
    reporter.stage_finish(summary.tally());

    info!("Total sequences: {}", stats.total);
    info!("Sequences with unknown residues: {}", stats.with_unknown);
    info!("Unique valid sequences: {}", stats.unique_valid);
    summary.log("peptide-list");
    Ok(PeptideListResult {
        table,
        stats,
        summary,
    })
}
