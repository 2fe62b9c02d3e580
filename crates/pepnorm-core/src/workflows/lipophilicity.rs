use crate::core::chemistry::ionization::parse_partition_coefficient;
use crate::core::models::columns::{C_TERMINUS, LOG_D, LOG_P, N_TERMINUS, PEPTIDE_ID, SEQUENCE};
use crate::core::models::table::Table;
use crate::core::utils::format::{SIGNIFICANT_DIGITS, format_sig};
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::report::RunSummary;
use tracing::{info, instrument, warn};

pub const REQUIRED_COLUMNS: [&str; 3] = [PEPTIDE_ID, SEQUENCE, LOG_P];

#[derive(Debug, Clone)]
pub struct LipophilicityResult {
    pub table: Table,
    pub summary: RunSummary,
}

/// Appends `logD` at the configured pH to a table of precomputed `logP` values.
///
/// Rows whose `logP` is missing or unreadable keep an empty `logD` and are listed
/// by peptide ID in the summary.
#[instrument(skip_all, name = "lipophilicity_workflow")]
pub fn run(
    lipophilicity: Table,
    config: &EngineConfig,
    reporter: &ProgressReporter,
) -> Result<LipophilicityResult, EngineError> {
    for column in REQUIRED_COLUMNS {
        lipophilicity.require_column(column)?;
    }
    let ph = config.lipophilicity.ph;
    info!(
        "Estimating logD at pH {} for {} peptides.",
        ph,
        lipophilicity.len()
    );

    reporter.stage_start("Lipophilicity", lipophilicity.name());
    let mut table = lipophilicity;
    let target = table.add_column(LOG_D);
    let mut summary = RunSummary::new(table.len());

    reporter.rows(table.len(), |row| {
        let id = table.cell(row, PEPTIDE_ID).to_string();
        let derived = parse_partition_coefficient(table.cell(row, LOG_P)).and_then(|log_p| {
            config.ionization.distribution_coefficient(
                Some(log_p),
                table.cell(row, SEQUENCE),
                ph,
                Some(table.cell(row, N_TERMINUS)),
                Some(table.cell(row, C_TERMINUS)),
            )
        });
        let cell = match derived {
            Ok(log_d) => format_sig(log_d, SIGNIFICANT_DIGITS),
            Err(e) => {
                warn!("Peptide {}: {}", id, e);
                summary.derivation_failures.push(id);
                String::new()
            }
        };
        table.set_cell(row, target, cell);
    });
    reporter.stage_finish(summary.tally());

    summary.log("lipophilicity");
    Ok(LipophilicityResult { table, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::tests::{default_builder, default_config};

    fn input(rows: &[[&str; 5]]) -> Table {
        let mut table = Table::new("lipophilicity", [PEPTIDE_ID, N_TERMINUS, SEQUENCE, C_TERMINUS, LOG_P]);
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        table
    }

    #[test]
    fn log_d_equals_log_p_without_ionizable_groups() {
        let table = input(&[["1", "C16", "AAA", "AMD", "1.5"]]);
        let result = run(table, &default_config(), &ProgressReporter::new()).unwrap();
        assert_eq!(result.table.cell(0, LOG_D), "1.5");
        assert!(result.summary.derivation_failures.is_empty());
    }

    #[test]
    fn basic_residues_lower_log_d() {
        let table = input(&[["1", "C16", "KKK", "AMD", "2"]]);
        let result = run(table, &default_config(), &ProgressReporter::new()).unwrap();
        let log_d: f64 = result.table.cell(0, LOG_D).parse().unwrap();
        assert!(log_d < 2.0 - 3.0 * 3.5);
    }

    #[test]
    fn configured_ph_is_used() {
        let table = input(&[["1", "", "H", "", "0"]]);
        let acidic = default_builder().ph(4.0).build().unwrap();
        let neutral = default_config();
        let at_four = run(table.clone(), &acidic, &ProgressReporter::new()).unwrap();
        let at_seven = run(table, &neutral, &ProgressReporter::new()).unwrap();
        assert_ne!(at_four.table.cell(0, LOG_D), at_seven.table.cell(0, LOG_D));
    }

    #[test]
    fn unreadable_log_p_is_a_counted_derivation_failure() {
        let table = input(&[["7", "C16", "KLK", "AMD", ""], ["8", "C16", "KLK", "AMD", "nan?"]]);
        let result = run(table, &default_config(), &ProgressReporter::new()).unwrap();
        assert_eq!(result.table.len(), 2);
        assert_eq!(result.table.cell(0, LOG_D), "");
        assert_eq!(result.summary.derivation_failures, vec!["7", "8"]);
    }

    #[test]
    fn missing_log_p_column_is_fatal() {
        let table = Table::new("lipophilicity", [PEPTIDE_ID, SEQUENCE]);
        assert!(matches!(
            run(table, &default_config(), &ProgressReporter::new()),
            Err(EngineError::Schema { .. })
        ));
    }
}
