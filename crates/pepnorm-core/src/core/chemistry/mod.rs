//! Physical and encoding models of a peptide: mass, lookup key and ionization.

pub mod ionization;
pub mod key;
pub mod mass;
pub mod tables;

/// Canonical form of a terminal-modification label for table lookups.
pub(crate) fn label_key(label: &str) -> String {
    label.trim().to_uppercase()
}
