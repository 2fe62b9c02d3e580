use crate::core::io::auxiliary::{AuxiliaryTable, KEY_COLUMN, TABLE_NAME as AUXILIARY_TABLE};
use crate::core::models::bound::{ConcentrationBound, ConvertedBound};
use crate::core::models::columns::{
    ACTIVE, C_TERMINUS, CONCENTRATION, LOWER_CONCENTRATION, LOWER_UM, MW_DA, N_TERMINUS, NEW_SEQ,
    SEQUENCE, SPECIES, STRAIN, TARGET_SPECIES, UNIT, UPPER_CONCENTRATION, UPPER_UM,
};
use crate::core::models::table::Table;
use crate::core::parsing::concentration;
use crate::core::parsing::species::split_species;
use crate::core::units::to_canonical;
use crate::core::utils::format::{format_fixed2, format_optional};
use crate::engine::classify::ActivityClassifier;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::join::{DatasetJoiner, KeyExtractor, KeyRule, Secondary};
use crate::engine::progress::ProgressReporter;
use crate::engine::report::RunSummary;
use tracing::{info, instrument, warn};

/// Columns every activity table must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = [SEQUENCE, CONCENTRATION, UNIT];

/// Derived columns appended to each activity row, in output order.
pub const DERIVED_COLUMNS: [&str; 9] = [
    MW_DA,
    NEW_SEQ,
    LOWER_CONCENTRATION,
    UPPER_CONCENTRATION,
    LOWER_UM,
    UPPER_UM,
    SPECIES,
    STRAIN,
    ACTIVE,
];

#[derive(Debug, Clone)]
pub struct NormalizeResult {
    pub table: Table,
    pub summary: RunSummary,
}

struct DerivedRow {
    cells: [String; 9],
    parse_failed: bool,
    conversion_failed: bool,
    key_failed: bool,
}

#[instrument(skip_all, name = "normalize_workflow")]
pub fn run(
    activity: Table,
    auxiliary: &AuxiliaryTable,
    config: &EngineConfig,
    reporter: &ProgressReporter,
) -> Result<NormalizeResult, EngineError> {
    // === Phase 1: Validation ===
    for column in REQUIRED_COLUMNS {
        activity.require_column(column)?;
    }
    info!(
        "Normalizing {} activity rows from '{}'.",
        activity.len(),
        activity.name()
    );

    // === Phase 2: Per-row derivation ===
    reporter.stage_start("Normalize", activity.name());
    let mut table = activity;
    let positions: Vec<usize> = DERIVED_COLUMNS
        .iter()
        .map(|column| table.add_column(*column))
        .collect();
    let classifier = ActivityClassifier::new(config.activity.threshold_um);
    let mut summary = RunSummary::new(table.len());

    reporter.rows(table.len(), |row| {
        let derived = derive_row(&table, row, config, &classifier);
        summary.parse_failures += usize::from(derived.parse_failed);
        summary.conversion_failures += usize::from(derived.conversion_failed);
        summary.key_failures += usize::from(derived.key_failed);
        for (&position, cell) in positions.iter().zip(derived.cells) {
            table.set_cell(row, position, cell);
        }
    });
    reporter.stage_finish(summary.tally());

    // === Phase 3: Auxiliary join on the sequence key ===
    reporter.stage_start("Auxiliary join", AUXILIARY_TABLE);
    let auxiliary_table = auxiliary.to_table();
    let secondary = Secondary::with_rule(
        &auxiliary_table,
        KeyRule {
            primary: KeyExtractor::Column(NEW_SEQ.to_string()),
            secondary_column: KEY_COLUMN.to_string(),
        },
    );
    let (table, outcomes) = DatasetJoiner::new(&config.keys).join(table, &[secondary])?;
    for outcome in &outcomes {
        summary.lookup_misses += outcome.missed.saturating_sub(summary.key_failures);
    }
    summary.joins = outcomes;
    reporter.stage_finish(summary.tally());

    summary.log("normalize");
    Ok(NormalizeResult { table, summary })
}

fn derive_row(
    table: &Table,
    row: usize,
    config: &EngineConfig,
    classifier: &ActivityClassifier,
) -> DerivedRow {
    let sequence = table.cell(row, SEQUENCE).trim().to_uppercase();
    let n_terminus = table.cell(row, N_TERMINUS);
    let c_terminus = table.cell(row, C_TERMINUS);
    let unit = table.cell(row, UNIT);

    let mass = config
        .masses
        .molecular_mass(&sequence, Some(n_terminus), Some(c_terminus));

    let (key, key_failed) = match config.keys.encode(n_terminus, &sequence, c_terminus) {
        Ok(key) => (key.into_string(), false),
        Err(e) => {
            warn!("Row {}: {}", row + 1, e);
            (String::new(), true)
        }
    };

    let (bound, parse_failed) = match concentration::try_parse(table.cell(row, CONCENTRATION)) {
        Ok(bound) => (bound, false),
        Err(e) => {
            warn!("Row {}: {}", row + 1, e);
            (ConcentrationBound::EMPTY, true)
        }
    };

    let mut conversion_failed = false;
    let mut convert = |end: Option<f64>| {
        let value = end?;
        match to_canonical(value, unit, Some(mass)) {
            Ok(converted) => Some(converted),
            Err(e) => {
                warn!("Row {}: cannot convert {} {}: {}", row + 1, value, unit, e);
                conversion_failed = true;
                None
            }
        }
    };
    let converted = ConvertedBound {
        lower: convert(bound.lower()),
        upper: convert(bound.upper()),
    };

    let (species, strain) = split_species(table.cell(row, TARGET_SPECIES));
    let label = classifier.classify(&converted);

    DerivedRow {
        cells: [
            format_fixed2(mass),
            key,
            format_optional(bound.lower()),
            format_optional(bound.upper()),
            format_optional(converted.lower),
            format_optional(converted.upper),
            species,
            strain,
            label.to_string(),
        ],
        parse_failed,
        conversion_failed,
        key_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::auxiliary::{AuxiliaryEntry, Scalar};
    use crate::core::models::columns::PEPTIDE_ID;
    use crate::engine::config::tests::default_config;

    fn activity(rows: &[[&str; 7]]) -> Table {
        let mut table = Table::new(
            "activity",
            [
                PEPTIDE_ID,
                N_TERMINUS,
                SEQUENCE,
                C_TERMINUS,
                TARGET_SPECIES,
                CONCENTRATION,
                UNIT,
            ],
        );
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        table
    }

    fn auxiliary() -> AuxiliaryTable {
        let mut lookup = AuxiliaryTable::default();
        lookup.insert(
            "ZZZZKLK00".to_string(),
            AuxiliaryEntry {
                curv_min: Scalar::parse("-0.5"),
                npol_min: Scalar::parse("0.25"),
                ..AuxiliaryEntry::default()
            },
        );
        lookup
    }

    #[test]
    fn derived_columns_are_appended_after_input_columns() {
        let input = activity(&[["1", "C16", "klk", "AMD", "Escherichia coli ATCC 25922", "6.25-12.5", "µM"]]);
        let result = run(input, &auxiliary(), &default_config(), &ProgressReporter::new()).unwrap();
        let table = result.table;

        assert_eq!(&table.columns()[7..16], &DERIVED_COLUMNS);
        assert_eq!(
            &table.columns()[16..],
            &["curv_min", "npol_min", "ph_run", "npol_c0", "npol_c1", "npol_c2"]
        );
        assert_eq!(table.cell(0, NEW_SEQ), "ZZZZKLK00");
        assert_eq!(table.cell(0, LOWER_CONCENTRATION), "6.25");
        assert_eq!(table.cell(0, UPPER_UM), "12.5");
        assert_eq!(table.cell(0, SPECIES), "Escherichia coli");
        assert_eq!(table.cell(0, STRAIN), "ATCC 25922");
        assert_eq!(table.cell(0, ACTIVE), "1");
        assert_eq!(table.cell(0, "curv_min"), "-0.5");
        assert_eq!(table.cell(0, "ph_run"), "");
    }

    #[test]
    fn mass_is_rendered_with_two_decimals() {
        let input = activity(&[["1", "", "AC", "", "", "1", "µM"]]);
        let result = run(input, &AuxiliaryTable::default(), &default_config(), &ProgressReporter::new())
            .unwrap();
        assert_eq!(result.table.cell(0, MW_DA), "192.25");
    }

    #[test]
    fn mass_units_use_the_computed_mass() {
        let input = activity(&[["1", "C16", "KLK", "AMD", "", "16", "µg/mL"]]);
        let config = default_config();
        let mass = config.masses.molecular_mass("KLK", Some("C16"), Some("AMD"));
        let result = run(input, &AuxiliaryTable::default(), &config, &ProgressReporter::new())
            .unwrap();
        let upper: f64 = result.table.cell(0, UPPER_UM).parse().unwrap();
        assert!((upper - 16.0 / (mass / 1000.0)).abs() < 1e-3);
    }

    #[test]
    fn failures_are_counted_and_rows_are_kept() {
        let input = activity(&[
            ["1", "C16", "KLK", "AMD", "", "4.5.5", "µM"],
            ["2", "C16", "KLK", "AMD", "", ">25", "furlongs"],
            ["3", "Ac", "GIG", "", "", "<=0.25", "mM"],
            ["4", "C16", "GIG", "", "", "", ""],
        ]);
        let result = run(input, &auxiliary(), &default_config(), &ProgressReporter::new()).unwrap();
        let table = &result.table;
        let summary = &result.summary;

        assert_eq!(table.len(), 4);
        assert_eq!(summary.parse_failures, 1);
        assert_eq!(summary.conversion_failures, 1);
        assert_eq!(summary.key_failures, 1);
        assert_eq!(summary.lookup_misses, 1);

        assert_eq!(table.cell(0, LOWER_CONCENTRATION), "");
        assert_eq!(table.cell(1, LOWER_CONCENTRATION), "25");
        assert_eq!(table.cell(1, LOWER_UM), "");
        assert_eq!(table.cell(1, ACTIVE), "0");
        assert_eq!(table.cell(2, NEW_SEQ), "");
        assert_eq!(table.cell(2, UPPER_UM), "250");
        assert_eq!(table.cell(2, ACTIVE), "0");
        assert_eq!(table.cell(3, ACTIVE), "0");
    }

    #[test]
    fn missing_concentration_column_is_fatal() {
        let mut table = Table::new("activity", [PEPTIDE_ID, SEQUENCE, UNIT]);
        table.push_row(vec!["1".into(), "KLK".into(), "µM".into()]);
        let result = run(table, &auxiliary(), &default_config(), &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Schema { .. })));
    }
}
