use super::{GlobalOptions, read_csv, write_csv};
use crate::cli::PeptideListArgs;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::utils::progress::StageProgress;
use crate::utils::summary::print_summary;
use pepnorm::engine::progress::ProgressReporter;
use pepnorm::workflows;

pub fn run(args: PeptideListArgs, options: GlobalOptions<'_>) -> Result<()> {
    let config = options.engine_config(ConfigOverrides::default())?;
    let peptides = read_csv(&args.input)?;

    let progress = StageProgress::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    let result =
        workflows::peptide_list::run(peptides, args.n_terminus.as_deref(), &config, &reporter)?;

    write_csv(&result.table, &args.output)?;
    print_summary("peptide-list", &result.summary, &args.output);
    println!("  Total sequences: {}", result.stats.total);
    println!("  Sequences with X (filtered): {}", result.stats.with_unknown);
    println!("  Unique valid sequences: {}", result.stats.unique_valid);
    Ok(())
}
