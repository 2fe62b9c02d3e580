use phf::{Map, phf_map};

/// Mass of the water molecule added when residues are joined into a chain (Da).
pub const WATER_MASS: f64 = 18.02;

/// Mass assumed for a residue code missing from [`RESIDUE_MASSES`] (Da).
pub const FALLBACK_RESIDUE_MASS: f64 = 110.0;

pub const N_TERMINUS_PKA: f64 = 9.0;
pub const C_TERMINUS_PKA: f64 = 3.5;

pub const DEFAULT_PH: f64 = 7.0;

/// Average residue masses in Da, keyed by uppercase one-letter code.
#[rustfmt::skip]
pub static RESIDUE_MASSES: Map<char, f64> = phf_map! {
    'A' => 71.08,  'R' => 156.19, 'N' => 114.10, 'D' => 115.09,
    'C' => 103.15, 'E' => 129.12, 'Q' => 128.13, 'G' => 57.05,
    'H' => 137.14, 'I' => 113.16, 'L' => 113.16, 'K' => 128.17,
    'M' => 131.20, 'F' => 147.18, 'P' => 97.12,  'S' => 87.08,
    'T' => 101.11, 'W' => 186.21, 'Y' => 163.18, 'V' => 99.13,
    'Z' => 56.10,  // C4 lipid block
    'X' => 110.0,  // unknown residue
};

/// Mass added by an N-terminal modification (Da), keyed by uppercase label.
#[rustfmt::skip]
pub static N_TERMINAL_ADDITIONS: Map<&'static str, f64> = phf_map! {
    "C16" => 239.2,
};

/// Mass change of a C-terminal modification relative to the free acid (Da).
#[rustfmt::skip]
pub static C_TERMINAL_DELTAS: Map<&'static str, f64> = phf_map! {
    "AMD" => -0.98,
};

/// Side-chain pKa of residues that lose a proton.
#[rustfmt::skip]
pub static ACIDIC_PKA: Map<char, f64> = phf_map! {
    'D' => 3.9, 'C' => 8.37, 'E' => 4.07, 'Y' => 10.5,
};

/// Side-chain pKa of residues that gain a proton.
#[rustfmt::skip]
pub static BASIC_PKA: Map<char, f64> = phf_map! {
    'R' => 12.48, 'H' => 6.04, 'K' => 10.54,
    'O' => 10.50, // ornithine
    'B' => 10.27, // 2,4-diaminobutyric acid
    'J' => 9.43,  // 2,3-diaminopropionic acid
};

/// N-terminal labels whose amine is acylated and therefore not ionizable.
pub const NON_IONIZABLE_N_TERMINAL: [&str; 2] = ["C12", "C16"];

/// C-terminal labels denoting an amidated terminus.
pub const AMIDATION_LABELS: [&str; 1] = ["AMD"];
