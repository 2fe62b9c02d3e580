use crate::error::{CliError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileActivityConfig {
    pub threshold_um: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileLipophilicityConfig {
    pub ph: Option<f64>,
    pub n_terminus_pka: Option<f64>,
    pub c_terminus_pka: Option<f64>,
    pub non_ionizable_n_terminal: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSequenceKeyConfig {
    pub block_size: Option<u32>,
    pub marker: Option<String>,
    pub amidated_suffix: Option<String>,
    pub free_acid_suffix: Option<String>,
    pub fallback_block_count: Option<u32>,
    pub amidation_labels: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileChemistryConfig {
    pub water_mass: Option<f64>,
    pub fallback_residue_mass: Option<f64>,
    pub residue_masses_path: Option<PathBuf>,
    #[serde(default)]
    pub n_terminal_masses: HashMap<String, f64>,
    #[serde(default)]
    pub c_terminal_deltas: HashMap<String, f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub activity: Option<FileActivityConfig>,
    pub lipophilicity: Option<FileLipophilicityConfig>,
    pub sequence_key: Option<FileSequenceKeyConfig>,
    pub chemistry: Option<FileChemistryConfig>,
}

impl FileConfig {
    /// Reads a config file. A relative `chemistry.residue-masses-path` is resolved
    /// against the directory of the config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let Some(chemistry) = config.chemistry.as_mut() {
            if let Some(masses) = chemistry.residue_masses_path.as_mut() {
                if masses.is_relative() {
                    if let Some(dir) = path.parent() {
                        *masses = dir.join(&*masses);
                    }
                }
            }
        }
        Ok(config)
    }
}
