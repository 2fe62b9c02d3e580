use crate::core::chemistry::ionization::IonizationModel;
use crate::core::chemistry::key::{KeyScheme, MAX_BLOCK_COUNT};
use crate::core::chemistry::mass::MassTable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LipophilicityConfig {
    pub ph: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityConfig {
    /// Largest micromolar concentration still labelled active.
    pub threshold_um: f64,
}

/// Immutable run configuration, built once and passed by reference to every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub masses: MassTable,
    pub keys: KeyScheme,
    pub ionization: IonizationModel,
    pub lipophilicity: LipophilicityConfig,
    pub activity: ActivityConfig,
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    masses: Option<MassTable>,
    keys: Option<KeyScheme>,
    ionization: Option<IonizationModel>,
    ph: Option<f64>,
    threshold_um: Option<f64>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masses(mut self, masses: MassTable) -> Self {
        self.masses = Some(masses);
        self
    }
    pub fn keys(mut self, keys: KeyScheme) -> Self {
        self.keys = Some(keys);
        self
    }
    pub fn ionization(mut self, ionization: IonizationModel) -> Self {
        self.ionization = Some(ionization);
        self
    }
    pub fn ph(mut self, ph: f64) -> Self {
        self.ph = Some(ph);
        self
    }
    pub fn threshold_um(mut self, threshold: f64) -> Self {
        self.threshold_um = Some(threshold);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let keys = self.keys.ok_or(ConfigError::MissingParameter("keys"))?;
        if keys.block_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "block_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if keys.marker.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "marker",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(fallback) = keys.fallback_block_count {
            if fallback == 0 || fallback > MAX_BLOCK_COUNT {
                return Err(ConfigError::InvalidParameter {
                    name: "fallback_block_count",
                    reason: format!("{} is outside 1..={}", fallback, MAX_BLOCK_COUNT),
                });
            }
        }

        let ph = self.ph.ok_or(ConfigError::MissingParameter("ph"))?;
        if !(0.0..=14.0).contains(&ph) {
            return Err(ConfigError::InvalidParameter {
                name: "ph",
                reason: format!("{} is outside 0..=14", ph),
            });
        }

        let threshold_um = self
            .threshold_um
            .ok_or(ConfigError::MissingParameter("threshold_um"))?;
        if !threshold_um.is_finite() || threshold_um < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "threshold_um",
                reason: format!("{} is not a non-negative number", threshold_um),
            });
        }

        Ok(EngineConfig {
            masses: self.masses.ok_or(ConfigError::MissingParameter("masses"))?,
            keys,
            ionization: self
                .ionization
                .ok_or(ConfigError::MissingParameter("ionization"))?,
            lipophilicity: LipophilicityConfig { ph },
            activity: ActivityConfig { threshold_um },
        })
    }
}
