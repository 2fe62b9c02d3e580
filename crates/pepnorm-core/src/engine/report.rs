use super::join::JoinOutcome;
use tracing::{info, warn};

/// Failure counts of a run, without identifiers or join details.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub rows: usize,
    pub parse_failures: usize,
    pub conversion_failures: usize,
    pub key_failures: usize,
    pub lookup_misses: usize,
    pub derivation_failures: usize,
}

impl Tally {
    pub fn rows(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }
}

/// Per-run tally of non-fatal record failures and join statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    /// Concentration strings that were malformed.
    pub parse_failures: usize,
    /// Bounds that could not be converted to micromolar.
    pub conversion_failures: usize,
    /// Rows whose sequence key could not be encoded.
    pub key_failures: usize,
    /// Keyed rows with no auxiliary match.
    pub lookup_misses: usize,
    /// Identifiers of entities whose derived properties could not be computed.
    pub derivation_failures: Vec<String>,
    pub joins: Vec<JoinOutcome>,
}

impl RunSummary {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn tally(&self) -> Tally {
        Tally {
            rows: self.rows,
            parse_failures: self.parse_failures,
            conversion_failures: self.conversion_failures,
            key_failures: self.key_failures,
            lookup_misses: self.lookup_misses,
            derivation_failures: self.derivation_failures.len(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.parse_failures > 0
            || self.conversion_failures > 0
            || self.key_failures > 0
            || !self.derivation_failures.is_empty()
    }

    /// Emits the summary through `tracing`.
    pub fn log(&self, stage: &str) {
        info!("{}: processed {} rows", stage, self.rows);
        if self.parse_failures > 0 {
            warn!("{}: {} malformed concentrations", stage, self.parse_failures);
        }
        if self.conversion_failures > 0 {
            warn!("{}: {} unconvertible concentrations", stage, self.conversion_failures);
        }
        if self.key_failures > 0 {
            warn!("{}: {} rows without a sequence key", stage, self.key_failures);
        }
        if self.lookup_misses > 0 {
            info!("{}: {} rows without auxiliary data", stage, self.lookup_misses);
        }
        if !self.derivation_failures.is_empty() {
            warn!(
                "{}: derivation failed for {} entities: {}",
                stage,
                self.derivation_failures.len(),
                self.derivation_failures.join(", ")
            );
        }
        for join in &self.joins {
            info!(
                "{}: '{}' matched {} of {} rows",
                stage,
                join.table,
                join.matched,
                join.matched + join.missed
            );
        }
    }
}
