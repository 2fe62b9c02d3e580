use super::{GlobalOptions, read_auxiliary, read_csv, read_optional_csv, write_csv};
use crate::cli::IntrinsicArgs;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::utils::progress::StageProgress;
use crate::utils::summary::print_summary;
use pepnorm::engine::progress::ProgressReporter;
use pepnorm::workflows::merge;

pub fn run(args: IntrinsicArgs, options: GlobalOptions<'_>) -> Result<()> {
    let config = options.engine_config(ConfigOverrides::default())?;

    let physchem = read_csv(&args.physchem)?;
    let lipophilicity = read_optional_csv(args.lipophilicity.as_deref())?;
    let auxiliary = args
        .auxiliary
        .as_deref()
        .map(read_auxiliary)
        .transpose()?;

    let progress = StageProgress::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    let result = merge::intrinsic(
        physchem,
        lipophilicity.as_ref(),
        auxiliary.as_ref(),
        &config,
        &reporter,
    )?;

    write_csv(&result.table, &args.output)?;
    print_summary("intrinsic", &result.summary, &args.output);
    Ok(())
}
