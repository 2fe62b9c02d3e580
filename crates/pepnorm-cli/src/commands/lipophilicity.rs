use super::{GlobalOptions, read_csv, write_csv};
use crate::cli::LipophilicityArgs;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::utils::progress::StageProgress;
use crate::utils::summary::print_summary;
use pepnorm::engine::progress::ProgressReporter;
use pepnorm::workflows;

pub fn run(args: LipophilicityArgs, options: GlobalOptions<'_>) -> Result<()> {
    let config = options.engine_config(ConfigOverrides {
        ph: args.ph,
        ..ConfigOverrides::default()
    })?;
    let table = read_csv(&args.input)?;

    let progress = StageProgress::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    println!("Estimating logD at pH {}...", config.lipophilicity.ph);
    let result = workflows::lipophilicity::run(table, &config, &reporter)?;

    write_csv(&result.table, &args.output)?;
    print_summary("lipophilicity", &result.summary, &args.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pepnorm::core::io::csv::CsvTable;
    use pepnorm::core::io::traits::TabularFile;
    use pepnorm::engine::error::EngineError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn log_d_column_is_appended() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lipophilicity.csv");
        fs::write(
            &input,
            "Peptide ID,N TERMINUS,SEQUENCE,C TERMINUS,logP\n1,C16,AAA,AMD,1.5\n2,C16,KLK,AMD,\n",
        )
        .unwrap();
        let output = dir.path().join("out.csv");

        run(
            LipophilicityArgs {
                input,
                output: output.clone(),
                ph: Some(7.0),
            },
            GlobalOptions {
                config: None,
                set_values: &[],
            },
        )
        .unwrap();

        let table = CsvTable::read_from_path(&output).unwrap();
        assert_eq!(table.cell(0, "logD"), "1.5");
        assert_eq!(table.cell(1, "logD"), "");
    }

    #[test]
    fn missing_log_p_column_fails_the_command() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lipophilicity.csv");
        fs::write(&input, "Peptide ID,SEQUENCE\n1,AAA\n").unwrap();

        let result = run(
            LipophilicityArgs {
                input,
                output: dir.path().join("out.csv"),
                ph: None,
            },
            GlobalOptions {
                config: None,
                set_values: &[],
            },
        );
        assert!(matches!(
            result,
            Err(CliError::Engine(EngineError::Schema { .. }))
        ));
    }
}
