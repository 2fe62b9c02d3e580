use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::error::{CliError, Result};
use pepnorm::core::chemistry::ionization::IonizationModel;
use pepnorm::core::chemistry::key::KeyScheme;
use pepnorm::core::chemistry::mass::MassTable;
use pepnorm::engine::config::{EngineConfig, EngineConfigBuilder};
use pepnorm::engine::error::EngineError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Values given directly as subcommand flags. They take precedence over `--set`
/// values and the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigOverrides {
    pub threshold_um: Option<f64>,
    pub ph: Option<f64>,
}

pub fn build_engine_config(
    config_path: Option<&Path>,
    set_values: &[String],
    overrides: ConfigOverrides,
) -> Result<EngineConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(path) = config_path {
        info!("Reading configuration from {:?}", path);
        FileConfig::from_file(path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, set_values)?;

    let activity_file = file_config.activity.take().unwrap_or_default();
    let threshold_um = overrides
        .threshold_um
        .or(activity_file.threshold_um)
        .unwrap_or(defaults.threshold_um);

    let lipophilicity_file = file_config.lipophilicity.take().unwrap_or_default();
    let ph = overrides
        .ph
        .or(lipophilicity_file.ph)
        .unwrap_or(defaults.ph);

    let key_file = file_config.sequence_key.take().unwrap_or_default();
    let mut keys = KeyScheme::default();
    if let Some(block_size) = key_file.block_size {
        keys.block_size = block_size;
    }
    if let Some(marker) = key_file.marker {
        keys.marker = marker;
    }
    if let Some(suffix) = key_file.amidated_suffix {
        keys.amidated_suffix = suffix;
    }
    if let Some(suffix) = key_file.free_acid_suffix {
        keys.free_acid_suffix = suffix;
    }
    keys.fallback_block_count = key_file.fallback_block_count;

    let mut ionization = IonizationModel::default();
    if let Some(pka) = lipophilicity_file.n_terminus_pka {
        ionization.n_terminus_pka = pka;
    }
    if let Some(pka) = lipophilicity_file.c_terminus_pka {
        ionization.c_terminus_pka = pka;
    }
    if let Some(labels) = lipophilicity_file.non_ionizable_n_terminal {
        ionization.non_ionizable_n_terminal = labels;
    }
    // Amidation hides the free acid both from the key suffix and from ionization.
    if let Some(labels) = key_file.amidation_labels {
        ionization.amidation_labels = labels.clone();
        keys.amidation_labels = labels;
    }

    let masses = build_mass_table(&mut file_config)?;

    debug!(
        "Resolved threshold {} µM, pH {}, key block size {}",
        threshold_um, ph, keys.block_size
    );

    EngineConfigBuilder::new()
        .masses(masses)
        .keys(keys)
        .ionization(ionization)
        .ph(ph)
        .threshold_um(threshold_um)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn build_mass_table(file_config: &mut FileConfig) -> Result<MassTable> {
    let Some(chemistry) = file_config.chemistry.take() else {
        return Ok(MassTable::default());
    };

    let mut masses = match &chemistry.residue_masses_path {
        Some(path) => {
            info!("Loading residue masses from {:?}", path);
            MassTable::load(path).map_err(EngineError::from)?
        }
        None => MassTable::default(),
    };
    if let Some(water) = chemistry.water_mass {
        masses.water = water;
    }
    if let Some(fallback) = chemistry.fallback_residue_mass {
        masses.fallback_residue = fallback;
    }
    for (label, mass) in &chemistry.n_terminal_masses {
        masses.set_n_terminal(label, *mass);
    }
    for (label, delta) in &chemistry.c_terminal_deltas {
        masses.set_c_terminal(label, *delta);
    }
    Ok(masses)
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "activity.threshold-um" => {
                config
                    .activity
                    .get_or_insert_with(Default::default)
                    .threshold_um = Some(parse_value(key, value_str, "float")?);
            }
            "lipophilicity.ph" => {
                config.lipophilicity.get_or_insert_with(Default::default).ph =
                    Some(parse_value(key, value_str, "float")?);
            }
            "lipophilicity.n-terminus-pka" => {
                config
                    .lipophilicity
                    .get_or_insert_with(Default::default)
                    .n_terminus_pka = Some(parse_value(key, value_str, "float")?);
            }
            "lipophilicity.c-terminus-pka" => {
                config
                    .lipophilicity
                    .get_or_insert_with(Default::default)
                    .c_terminus_pka = Some(parse_value(key, value_str, "float")?);
            }
            "sequence-key.block-size" => {
                config
                    .sequence_key
                    .get_or_insert_with(Default::default)
                    .block_size = Some(parse_value(key, value_str, "integer")?);
            }
            "sequence-key.marker" => {
                config.sequence_key.get_or_insert_with(Default::default).marker =
                    Some(value_str.trim().to_string());
            }
            "sequence-key.amidated-suffix" => {
                config
                    .sequence_key
                    .get_or_insert_with(Default::default)
                    .amidated_suffix = Some(value_str.trim().to_string());
            }
            "sequence-key.free-acid-suffix" => {
                config
                    .sequence_key
                    .get_or_insert_with(Default::default)
                    .free_acid_suffix = Some(value_str.trim().to_string());
            }
            "sequence-key.fallback-block-count" => {
                config
                    .sequence_key
                    .get_or_insert_with(Default::default)
                    .fallback_block_count = Some(parse_value(key, value_str, "integer")?);
            }
            "chemistry.water-mass" => {
                config.chemistry.get_or_insert_with(Default::default).water_mass =
                    Some(parse_value(key, value_str, "float")?);
            }
            "chemistry.fallback-residue-mass" => {
                config
                    .chemistry
                    .get_or_insert_with(Default::default)
                    .fallback_residue_mass = Some(parse_value(key, value_str, "float")?);
            }
            "chemistry.residue-masses-path" => {
                config
                    .chemistry
                    .get_or_insert_with(Default::default)
                    .residue_masses_path = Some(PathBuf::from(value_str.trim()));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
