use super::write_csv;
use crate::cli::{CardArgs, CollectArgs, CollectCommands};
use crate::error::Result;
use crate::utils::progress::StageProgress;
use pepnorm::core::io::cards::load_cards;
use pepnorm::engine::error::EngineError;
use pepnorm::engine::progress::ProgressReporter;
use pepnorm::workflows::collect;
use tracing::info;

pub fn run(args: CollectArgs) -> Result<()> {
    let (kind, card_args) = match &args.command {
        CollectCommands::Physchem(card_args) => ("physchem", card_args),
        CollectCommands::Activity(card_args) => ("activity", card_args),
    };
    let CardArgs { cards, output } = card_args;

    info!("Loading peptide cards from {} file(s)", cards.len());
    let loaded = load_cards(cards).map_err(EngineError::from)?;
    info!("Loaded {} peptide cards.", loaded.len());

    let progress = StageProgress::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    let table = match &args.command {
        CollectCommands::Physchem(_) => collect::physchem_table(&loaded, &reporter),
        CollectCommands::Activity(_) => collect::activity_table(&loaded, &reporter),
    };

    write_csv(&table, output)?;
    println!(
        "✓ Collected {} {} rows from {} peptides into {}",
        table.len(),
        kind,
        loaded.len(),
        output.display()
    );
    Ok(())
}
