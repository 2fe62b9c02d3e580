use super::{GlobalOptions, read_auxiliary, read_csv, write_csv};
use crate::cli::NormalizeArgs;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::utils::progress::StageProgress;
use crate::utils::summary::print_summary;
use pepnorm::core::io::auxiliary::AuxiliaryTable;
use pepnorm::engine::progress::ProgressReporter;
use pepnorm::workflows;
use tracing::info;

pub fn run(args: NormalizeArgs, options: GlobalOptions<'_>) -> Result<()> {
    let config = options.engine_config(ConfigOverrides {
        threshold_um: args.threshold_um,
        ..ConfigOverrides::default()
    })?;

    let activity = read_csv(&args.input)?;
    let auxiliary = match &args.auxiliary {
        Some(path) => read_auxiliary(path)?,
        None => {
            info!("No auxiliary lookup given; auxiliary columns stay empty.");
            AuxiliaryTable::default()
        }
    };
    info!("Auxiliary lookup holds {} sequence keys.", auxiliary.len());

    let progress = StageProgress::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    println!("Normalizing activity table...");
    let result = workflows::normalize::run(activity, &auxiliary, &config, &reporter)?;

    write_csv(&result.table, &args.output)?;
    print_summary("normalize", &result.summary, &args.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pepnorm::core::io::csv::CsvTable;
    use pepnorm::core::io::traits::TabularFile;
    use std::fs;
    use tempfile::tempdir;

    fn options() -> GlobalOptions<'static> {
        GlobalOptions {
            config: None,
            set_values: &[],
        }
    }

    #[test]
    fn normalized_table_carries_derived_and_auxiliary_columns() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("activity.csv");
        fs::write(
            &input,
            "Peptide ID,N TERMINUS,SEQUENCE,C TERMINUS,targetSpecies,concentration,unit\n\
             1,C16,KLK,AMD,Escherichia coli ATCC 25922,6.25-12.5,µM\n\
             2,C16,KLK,AMD,Staphylococcus aureus,>50,µM\n",
        )
        .unwrap();
        let auxiliary = dir.path().join("list_min.txt");
        fs::write(
            &auxiliary,
            "sequence npol_min curv_min pH npol_c0 npol_c1 npol_c2\n\
             ZZZZKLK00 0.2 -0.5 7.0 1 NA 3\n",
        )
        .unwrap();
        let output = dir.path().join("normalized.csv");

        run(
            NormalizeArgs {
                input,
                output: output.clone(),
                auxiliary: Some(auxiliary),
                threshold_um: Some(10.0),
            },
            options(),
        )
        .unwrap();

        let table = CsvTable::read_from_path(&output).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "NEW_SEQ"), "ZZZZKLK00");
        assert_eq!(table.cell(0, "active"), "0");
        assert_eq!(table.cell(1, "lower_uM"), "50");
        assert_eq!(table.cell(1, "active"), "0");
        assert_eq!(table.cell(0, "curv_min"), "-0.5");
        assert_eq!(table.cell(0, "npol_c1"), "");
        assert_eq!(table.cell(0, "ph_run"), "7.0");
    }

    #[test]
    fn missing_auxiliary_file_is_not_fatal() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("activity.csv");
        fs::write(&input, "SEQUENCE,concentration,unit\nKLK,5,nM\n").unwrap();
        let output = dir.path().join("normalized.csv");

        run(
            NormalizeArgs {
                input,
                output: output.clone(),
                auxiliary: Some(dir.path().join("absent.txt")),
                threshold_um: None,
            },
            options(),
        )
        .unwrap();

        let table = CsvTable::read_from_path(&output).unwrap();
        assert_eq!(table.cell(0, "upper_uM"), "0.005");
        assert_eq!(table.cell(0, "active"), "1");
    }
}
