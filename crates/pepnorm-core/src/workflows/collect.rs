use crate::core::io::cards::{PeptideCard, value_text};
use crate::core::models::columns::{IDENTITY_COLUMNS, NET_CHARGE, UNUSUAL_AMINO_ACIDS};
use crate::core::models::record::{PropertyRecord, PropertyTable};
use crate::core::models::table::Table;
use crate::core::utils::format::format_decimal;
use crate::engine::progress::ProgressReporter;
use crate::engine::report::Tally;
use tracing::{debug, info, instrument, warn};

/// Activity fields that never become columns, compared case-insensitively.
pub const EXCLUDED_ACTIVITY_KEYS: [&str; 3] = ["id", "activity", "activityMeasureValue"];

/// N-terminal labels starting with this prefix are acyl chains.
const ACYL_PREFIX: char = 'C';

fn identity(card: &PeptideCard) -> Vec<String> {
    vec![
        card.id_text(),
        card.n_terminus_name(),
        card.sequence_text(),
        card.c_terminus_name(),
    ]
}

fn is_acylated(n_terminus: &str) -> bool {
    n_terminus.trim().starts_with(ACYL_PREFIX)
}

/// An acyl chain removes the free amine's charge from the reported net charge.
fn adjust_net_charge(card_id: &str, value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(charge) if charge.is_finite() => format_decimal(charge - 1.0),
        _ => {
            warn!(
                "Peptide {}: net charge '{}' is not numeric; left unchanged",
                card_id, value
            );
            value.to_string()
        }
    }
}

/// Builds the physicochemical table: identity columns, then each property name in
/// first-seen order.
#[instrument(skip_all, name = "collect_physchem")]
pub fn physchem_table(cards: &[PeptideCard], reporter: &ProgressReporter) -> Table {
    reporter.stage_start("Collect physchem", "physchem");
    let mut builder = PropertyTable::new("physchem", IDENTITY_COLUMNS);

    reporter.rows(cards.len(), |index| {
        let card = &cards[index];
        let id = card.id_text();
        let mut record = PropertyRecord::new(id.clone());
        for (name, value) in card.properties() {
            record.set(name, value);
        }
        if is_acylated(&card.n_terminus_name()) {
            if let Some(charge) = record.get_mut(NET_CHARGE) {
                let adjusted = adjust_net_charge(&id, charge);
                *charge = adjusted;
            }
        }
        builder.push(identity(card), record);
    });

    let table = builder.into_table();
    reporter.stage_finish(Tally::rows(table.len()));
    info!(
        "Collected {} physicochemical rows with {} columns.",
        table.len(),
        table.width()
    );
    table
}

fn is_excluded(key: &str) -> bool {
    EXCLUDED_ACTIVITY_KEYS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(key))
}

/// Builds the activity table: identity columns, unusual amino acids, then each
/// activity field in first-seen order. A card yields one row per activity, or a
/// single bare row when it lists none.
#[instrument(skip_all, name = "collect_activity")]
pub fn activity_table(cards: &[PeptideCard], reporter: &ProgressReporter) -> Table {
    reporter.stage_start("Collect activity", "activity");
    let mut base = IDENTITY_COLUMNS.to_vec();
    base.push(UNUSUAL_AMINO_ACIDS);
    let mut builder = PropertyTable::new("activity", base);

    reporter.rows(cards.len(), |index| {
        let card = &cards[index];
        let mut base_values = identity(card);
        base_values.push(card.unusual_amino_acids_text());

        let activities = card.activities();
        if activities.is_empty() {
            debug!("Peptide {} lists no activities", base_values[0]);
            builder.push(base_values, PropertyRecord::new(card.id_text()));
            return;
        }
        for activity in activities {
            let mut record = PropertyRecord::new(card.id_text());
            for (key, value) in activity.iter().filter(|(key, _)| !is_excluded(key)) {
                record.set(key.as_str(), value_text(value));
            }
            builder.push(base_values.clone(), record);
        }
    });

    let table = builder.into_table();
    reporter.stage_finish(Tally::rows(table.len()));
    info!(
        "Collected {} activity rows from {} peptides.",
        table.len(),
        cards.len()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::cards::read_cards;
    use crate::core::models::columns::{C_TERMINUS, N_TERMINUS, PEPTIDE_ID, SEQUENCE};

    const CARDS: &str = r#"[
      {
        "id": 838,
        "sequence": "KLKLLLLKLLK",
        "nTerminus": { "name": "C16" },
        "cTerminus": { "name": "AMD" },
        "physicoChemicalProperties": [
          { "name": "Net Charge", "value": "4" },
          { "name": "ID", "value": "838" },
          { "name": "Hydrophobicity", "value": " 0.62 " }
        ],
        "unusualAminoAcids": [
          { "modificationType": { "name": "D-Lys" } },
          { "modificationType": { "name": "Orn" } }
        ],
        "targetActivities": [
          {
            "id": 1,
            "activity": "MIC",
            "ActivityMeasureValue": "MIC",
            "targetSpecies": { "name": "Escherichia coli ATCC 25922" },
            "concentration": "6.25",
            "unit": { "name": "µM" }
          },
          {
            "targetSpecies": { "name": "Staphylococcus aureus" },
            "concentration": ">50",
            "unit": { "name": "µg/ml" },
            "note": null
          }
        ]
      },
      {
        "id": 839,
        "sequence": "GIGKFLHSAK",
        "nTerminus": { "name": "Ac" },
        "cTerminus": null,
        "physicoChemicalProperties": [
          { "name": "Length", "value": 10 },
          { "name": "Net Charge", "value": "2" }
        ]
      }
    ]"#;

    fn cards() -> Vec<PeptideCard> {
        read_cards(CARDS.as_bytes(), "cards.json").unwrap()
    }

    #[test]
    fn physchem_columns_follow_first_seen_order() {
        let table = physchem_table(&cards(), &ProgressReporter::new());
        assert_eq!(
            table.columns(),
            &[
                PEPTIDE_ID,
                N_TERMINUS,
                SEQUENCE,
                C_TERMINUS,
                "Net Charge",
                "Hydrophobicity",
                "Length"
            ]
        );
        assert_eq!(table.cell(0, "Hydrophobicity"), "0.62");
        assert_eq!(table.cell(1, "Hydrophobicity"), "");
        assert_eq!(table.cell(1, "Length"), "10");
        assert_eq!(table.cell(1, C_TERMINUS), "");
    }

    #[test]
    fn net_charge_is_shifted_for_acylated_n_terminus_only() {
        let table = physchem_table(&cards(), &ProgressReporter::new());
        assert_eq!(table.cell(0, NET_CHARGE), "3.0");
        assert_eq!(table.cell(1, NET_CHARGE), "2");
    }

    #[test]
    fn non_numeric_net_charge_is_left_unchanged() {
        assert_eq!(adjust_net_charge("1", "n/a"), "n/a");
        assert_eq!(adjust_net_charge("1", "0.5"), "-0.5");
    }

    #[test]
    fn activity_rows_expand_per_activity() {
        let table = activity_table(&cards(), &ProgressReporter::new());
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.columns(),
            &[
                PEPTIDE_ID,
                N_TERMINUS,
                SEQUENCE,
                C_TERMINUS,
                UNUSUAL_AMINO_ACIDS,
                "targetSpecies",
                "concentration",
                "unit",
                "note"
            ]
        );
        assert_eq!(table.cell(0, UNUSUAL_AMINO_ACIDS), "D-Lys, Orn");
        assert_eq!(table.cell(0, "targetSpecies"), "Escherichia coli ATCC 25922");
        assert_eq!(table.cell(1, "concentration"), ">50");
        assert_eq!(table.cell(1, PEPTIDE_ID), "838");
    }

    #[test]
    fn card_without_activities_yields_a_bare_row() {
        let table = activity_table(&cards(), &ProgressReporter::new());
        assert_eq!(table.cell(2, PEPTIDE_ID), "839");
        assert_eq!(table.cell(2, N_TERMINUS), "Ac");
        assert_eq!(table.cell(2, "concentration"), "");
    }

    #[test]
    fn excluded_keys_match_case_insensitively() {
        assert!(is_excluded("ID"));
        assert!(is_excluded("activitymeasurevalue"));
        assert!(!is_excluded("unit"));
    }
}
