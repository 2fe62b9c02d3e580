//! Column names shared by the input and output tables of the pipeline.

pub const PEPTIDE_ID: &str = "Peptide ID";
pub const N_TERMINUS: &str = "N TERMINUS";
pub const SEQUENCE: &str = "SEQUENCE";
pub const C_TERMINUS: &str = "C TERMINUS";
pub const SMILES: &str = "SMILES";
pub const UNUSUAL_AMINO_ACIDS: &str = "Unusual Amino Acids";

/// Columns that identify a peptide rather than describe one of its properties.
pub const IDENTITY_COLUMNS: [&str; 4] = [PEPTIDE_ID, N_TERMINUS, SEQUENCE, C_TERMINUS];

// --- Raw activity fields ---
pub const CONCENTRATION: &str = "concentration";
pub const UNIT: &str = "unit";
pub const TARGET_SPECIES: &str = "targetSpecies";

// --- Derived activity fields ---
pub const MW_DA: &str = "MW_Da";
pub const NEW_SEQ: &str = "NEW_SEQ";
pub const LOWER_CONCENTRATION: &str = "lower_concentration";
pub const UPPER_CONCENTRATION: &str = "upper_concentration";
pub const LOWER_UM: &str = "lower_uM";
pub const UPPER_UM: &str = "upper_uM";
pub const SPECIES: &str = "species";
pub const STRAIN: &str = "strain";
pub const ACTIVE: &str = "active";

// --- Lipophilicity ---
pub const LOG_P: &str = "logP";
pub const LOG_D: &str = "logD";

// --- Peptide list ---
pub const TOTAL_SEQUENCE: &str = "total_sequence";
pub const FILTERED_SEQUENCE: &str = "filtered_sequence";

// --- Physicochemical card properties ---
pub const NET_CHARGE: &str = "Net Charge";
