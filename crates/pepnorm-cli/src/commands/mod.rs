pub mod collect;
pub mod intrinsic;
pub mod lipophilicity;
pub mod normalize;
pub mod peptide_list;
pub mod unify;

use crate::config::{ConfigOverrides, build_engine_config};
use crate::error::{CliError, Result};
use pepnorm::core::io::auxiliary::AuxiliaryTable;
use pepnorm::core::io::csv::CsvTable;
use pepnorm::core::io::traits::TabularFile;
use pepnorm::core::models::table::Table;
use pepnorm::engine::config::EngineConfig;
use std::path::Path;
use tracing::{info, warn};

/// Options shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions<'a> {
    pub config: Option<&'a Path>,
    pub set_values: &'a [String],
}

impl GlobalOptions<'_> {
    pub fn engine_config(&self, overrides: ConfigOverrides) -> Result<EngineConfig> {
        build_engine_config(self.config, self.set_values, overrides)
    }
}

pub(crate) fn read_csv(path: &Path) -> Result<Table> {
    info!("Loading table from {:?}", path);
    let table = CsvTable::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!(
        "Loaded '{}' with {} rows and {} columns.",
        table.name(),
        table.len(),
        table.width()
    );
    Ok(table)
}

/// Reads a table that a command can do without. A path that does not exist is
/// skipped with a warning; a file that exists but cannot be parsed is still an error.
pub(crate) fn read_optional_csv(path: Option<&Path>) -> Result<Option<Table>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !path.exists() {
        warn!("Optional table {:?} not found; continuing without it.", path);
        return Ok(None);
    }
    read_csv(path).map(Some)
}

pub(crate) fn read_auxiliary(path: &Path) -> Result<AuxiliaryTable> {
    info!("Loading auxiliary lookup from {:?}", path);
    AuxiliaryTable::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub(crate) fn write_csv(table: &Table, path: &Path) -> Result<()> {
    info!("Writing {} rows to {:?}", table.len(), path);
    CsvTable::write_to_path(table, path).map_err(|source| CliError::FileWriting {
        path: path.to_path_buf(),
        source,
    })
}
