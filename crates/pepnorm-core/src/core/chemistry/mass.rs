use super::label_key;
use super::tables::{
    C_TERMINAL_DELTAS, FALLBACK_RESIDUE_MASS, N_TERMINAL_ADDITIONS, RESIDUE_MASSES, WATER_MASS,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Average-mass model of a peptide chain.
#[derive(Debug, Clone, PartialEq)]
pub struct MassTable {
    residues: HashMap<char, f64>,
    pub fallback_residue: f64,
    pub water: f64,
    n_terminal: HashMap<String, f64>,
    c_terminal: HashMap<String, f64>,
}

impl Default for MassTable {
    fn default() -> Self {
        Self {
            residues: RESIDUE_MASSES.entries().map(|(&c, &m)| (c, m)).collect(),
            fallback_residue: FALLBACK_RESIDUE_MASS,
            water: WATER_MASS,
            n_terminal: N_TERMINAL_ADDITIONS
                .entries()
                .map(|(&label, &m)| (label.to_string(), m))
                .collect(),
            c_terminal: C_TERMINAL_DELTAS
                .entries()
                .map(|(&label, &m)| (label.to_string(), m))
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MassTableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid residue code '{code}' in '{path}': expected a single letter")]
    InvalidResidue { path: String, code: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct MassOverrides {
    water: Option<f64>,
    fallback_residue: Option<f64>,
    #[serde(default)]
    residues: HashMap<String, f64>,
    #[serde(default)]
    n_terminal: HashMap<String, f64>,
    #[serde(default)]
    c_terminal: HashMap<String, f64>,
}

impl MassTable {
    /// Loads a TOML override file and applies it on top of the built-in tables.
    ///
    /// ```toml
    /// water = 18.02
    /// [residues]
    /// O = 114.15
    /// [n-terminal]
    /// C8 = 126.2
    /// ```
    pub fn load(path: &Path) -> Result<Self, MassTableLoadError> {
        let display = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| MassTableLoadError::Io {
            path: display.clone(),
            source: e,
        })?;
        let overrides: MassOverrides =
            toml::from_str(&content).map_err(|e| MassTableLoadError::Toml {
                path: display.clone(),
                source: e,
            })?;

        let mut table = Self::default();
        if let Some(water) = overrides.water {
            table.water = water;
        }
        if let Some(fallback) = overrides.fallback_residue {
            table.fallback_residue = fallback;
        }
        for (code, mass) in overrides.residues {
            let mut chars = code.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => table.set_residue(c, mass),
                _ => {
                    return Err(MassTableLoadError::InvalidResidue {
                        path: display,
                        code,
                    });
                }
            }
        }
        for (label, mass) in overrides.n_terminal {
            table.set_n_terminal(&label, mass);
        }
        for (label, delta) in overrides.c_terminal {
            table.set_c_terminal(&label, delta);
        }
        Ok(table)
    }

    pub fn set_residue(&mut self, code: char, mass: f64) {
        self.residues.insert(code.to_ascii_uppercase(), mass);
    }

    pub fn set_n_terminal(&mut self, label: &str, mass: f64) {
        self.n_terminal.insert(label_key(label), mass);
    }

    pub fn set_c_terminal(&mut self, label: &str, delta: f64) {
        self.c_terminal.insert(label_key(label), delta);
    }

    /// Average mass of a residue; unknown codes get the fallback mass.
    pub fn residue_mass(&self, code: char) -> f64 {
        self.residues
            .get(&code.to_ascii_uppercase())
            .copied()
            .unwrap_or(self.fallback_residue)
    }

    pub fn n_terminal_addition(&self, label: &str) -> Option<f64> {
        self.n_terminal.get(&label_key(label)).copied()
    }

    pub fn c_terminal_delta(&self, label: &str) -> Option<f64> {
        self.c_terminal.get(&label_key(label)).copied()
    }

    /// Average molecular mass of `sequence` with optional terminal modifications (Da).
    ///
    /// Residue masses are summed, one water is added, then the N-terminal addition and
    /// the C-terminal delta apply when their labels are known. Whitespace is ignored.
    pub fn molecular_mass(
        &self,
        sequence: &str,
        n_terminus: Option<&str>,
        c_terminus: Option<&str>,
    ) -> f64 {
        let residues: f64 = sequence
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| self.residue_mass(c))
            .sum();
        let n_addition = n_terminus
            .and_then(|label| self.n_terminal_addition(label))
            .unwrap_or(0.0);
        let c_delta = c_terminus
            .and_then(|label| self.c_terminal_delta(label))
            .unwrap_or(0.0);
        residues + self.water + n_addition + c_delta
    }
}
