use super::label_key;
use super::tables::{
    ACIDIC_PKA, AMIDATION_LABELS, BASIC_PKA, C_TERMINUS_PKA, N_TERMINUS_PKA,
    NON_IONIZABLE_N_TERMINAL,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DerivationError {
    #[error("Partition coefficient is missing")]
    MissingPartitionCoefficient,
    #[error("Partition coefficient '{0}' is not a finite number")]
    InvalidPartitionCoefficient(String),
    #[error("pH {0} is not a finite number")]
    InvalidPh(f64),
}

/// Henderson–Hasselbalch correction for one acidic group: `-log10(1 + 10^(pH - pKa))`.
pub fn acidic_correction(ph: f64, pka: f64) -> f64 {
    -(1.0 + 10f64.powf(ph - pka)).log10()
}

/// Henderson–Hasselbalch correction for one basic group: `-log10(1 + 10^(pKa - pH))`.
pub fn basic_correction(ph: f64, pka: f64) -> f64 {
    -(1.0 + 10f64.powf(pka - ph)).log10()
}

/// Ionizable groups of a peptide and the rules that decide which termini are charged.
#[derive(Debug, Clone, PartialEq)]
pub struct IonizationModel {
    acidic: HashMap<char, f64>,
    basic: HashMap<char, f64>,
    pub n_terminus_pka: f64,
    pub c_terminus_pka: f64,
    pub non_ionizable_n_terminal: Vec<String>,
    pub amidation_labels: Vec<String>,
}

impl Default for IonizationModel {
    fn default() -> Self {
        Self {
            acidic: ACIDIC_PKA.entries().map(|(&c, &p)| (c, p)).collect(),
            basic: BASIC_PKA.entries().map(|(&c, &p)| (c, p)).collect(),
            n_terminus_pka: N_TERMINUS_PKA,
            c_terminus_pka: C_TERMINUS_PKA,
            non_ionizable_n_terminal: NON_IONIZABLE_N_TERMINAL
                .iter()
                .map(|s| s.to_string())
                .collect(),
            amidation_labels: AMIDATION_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IonizationModel {
    fn has_free_n_terminus(&self, n_terminus: Option<&str>) -> bool {
        match n_terminus.map(label_key) {
            Some(label) if !label.is_empty() => !self
                .non_ionizable_n_terminal
                .iter()
                .any(|candidate| label_key(candidate) == label),
            _ => true,
        }
    }

    fn has_free_c_terminus(&self, c_terminus: Option<&str>) -> bool {
        match c_terminus.map(label_key) {
            Some(label) if !label.is_empty() => !self
                .amidation_labels
                .iter()
                .any(|candidate| label_key(candidate) == label),
            _ => true,
        }
    }

    /// Sum of the side-chain and free-terminus corrections at `ph`.
    pub fn correction(
        &self,
        sequence: &str,
        ph: f64,
        n_terminus: Option<&str>,
        c_terminus: Option<&str>,
    ) -> f64 {
        let side_chains: f64 = sequence
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .map(|c| {
                if let Some(&pka) = self.acidic.get(&c) {
                    acidic_correction(ph, pka)
                } else if let Some(&pka) = self.basic.get(&c) {
                    basic_correction(ph, pka)
                } else {
                    0.0
                }
            })
            .sum();

        let mut total = side_chains;
        if self.has_free_n_terminus(n_terminus) {
            total += basic_correction(ph, self.n_terminus_pka);
        }
        if self.has_free_c_terminus(c_terminus) {
            total += acidic_correction(ph, self.c_terminus_pka);
        }
        total
    }

    /// Distribution coefficient (logD) at `ph` from a neutral-form partition coefficient.
    ///
    /// An empty sequence carries no ionization information and returns `log_p` as is.
    pub fn distribution_coefficient(
        &self,
        log_p: Option<f64>,
        sequence: &str,
        ph: f64,
        n_terminus: Option<&str>,
        c_terminus: Option<&str>,
    ) -> Result<f64, DerivationError> {
        let log_p = log_p.ok_or(DerivationError::MissingPartitionCoefficient)?;
        if !log_p.is_finite() {
            return Err(DerivationError::InvalidPartitionCoefficient(log_p.to_string()));
        }
        if !ph.is_finite() {
            return Err(DerivationError::InvalidPh(ph));
        }
        if sequence.trim().is_empty() {
            return Ok(log_p);
        }
        Ok(log_p + self.correction(sequence, ph, n_terminus, c_terminus))
    }
}

/// Parses a textual partition coefficient as found in a lipophilicity table.
pub fn parse_partition_coefficient(text: &str) -> Result<f64, DerivationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DerivationError::MissingPartitionCoefficient);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DerivationError::InvalidPartitionCoefficient(trimmed.to_string()))
}
