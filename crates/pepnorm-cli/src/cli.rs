use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pepnorm - Normalize antimicrobial peptide activity and property tables for modelling.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S activity.threshold-um=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build physicochemical or activity tables from fetched peptide card JSON files.
    Collect(CollectArgs),
    /// Parse concentrations, convert them to µM and label activity.
    Normalize(NormalizeArgs),
    /// Estimate logD at a given pH from precomputed logP values.
    Lipophilicity(LipophilicityArgs),
    /// Merge normalized activity with physicochemical and lipophilicity properties.
    Unify(UnifyArgs),
    /// Merge physicochemical, lipophilicity and auxiliary membrane properties per peptide.
    Intrinsic(IntrinsicArgs),
    /// Append sequence keys and a deduplicated key list to a peptide table.
    PeptideList(PeptideListArgs),
}

/// Arguments for the `collect` subcommand.
#[derive(Args, Debug)]
pub struct CollectArgs {
    #[command(subcommand)]
    pub command: CollectCommands,
}

#[derive(Subcommand, Debug)]
pub enum CollectCommands {
    /// One row per peptide with every physicochemical property as a column.
    Physchem(CardArgs),
    /// One row per reported activity.
    Activity(CardArgs),
}

#[derive(Args, Debug)]
pub struct CardArgs {
    /// Peptide card JSON files, each holding one card or an array of cards.
    #[arg(required = true, value_name = "PATH")]
    pub cards: Vec<PathBuf>,

    /// Path for the output CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Path to the activity CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the normalized CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Whitespace-delimited auxiliary lookup table keyed by sequence key.
    #[arg(short, long, value_name = "PATH")]
    pub auxiliary: Option<PathBuf>,

    /// Override `activity.threshold-um` from the config file.
    #[arg(short, long, value_name = "FLOAT")]
    pub threshold_um: Option<f64>,
}

/// Arguments for the `lipophilicity` subcommand.
#[derive(Args, Debug)]
pub struct LipophilicityArgs {
    /// CSV table with `Peptide ID`, terminus labels, `SEQUENCE` and `logP`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override `lipophilicity.ph` from the config file.
    #[arg(long, value_name = "FLOAT")]
    pub ph: Option<f64>,
}

/// Arguments for the `unify` subcommand.
#[derive(Args, Debug)]
pub struct UnifyArgs {
    /// Normalized activity CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub activity: PathBuf,

    /// Physicochemical CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub physchem: PathBuf,

    /// Lipophilicity CSV table. Skipped when absent.
    #[arg(short, long, value_name = "PATH")]
    pub lipophilicity: Option<PathBuf>,

    /// Path for the unified CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `intrinsic` subcommand.
#[derive(Args, Debug)]
pub struct IntrinsicArgs {
    /// Physicochemical CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub physchem: PathBuf,

    /// Lipophilicity CSV table. Skipped when absent.
    #[arg(short, long, value_name = "PATH")]
    pub lipophilicity: Option<PathBuf>,

    /// Whitespace-delimited auxiliary lookup table. Skipped when absent.
    #[arg(short, long, value_name = "PATH")]
    pub auxiliary: Option<PathBuf>,

    /// Path for the output CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `peptide-list` subcommand.
#[derive(Args, Debug)]
pub struct PeptideListArgs {
    /// Peptide CSV table with `SEQUENCE` and `C TERMINUS` columns.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Key every row with this N-terminal label (e.g. 'C16') instead of its own.
    #[arg(short, long, value_name = "LABEL")]
    pub n_terminus: Option<String>,
}
