use super::label_key;
use super::tables::AMIDATION_LABELS;
use std::fmt;
use thiserror::Error;

/// Cross-table join key built from terminal metadata and the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceKey(String);

impl SequenceKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("N-terminal label '{0}' carries no block count")]
    MissingBlockCount(String),
    #[error("N-terminal label '{label}' gives zero blocks of size {block_size}")]
    ZeroBlocks { label: String, block_size: u32 },
    #[error("N-terminal label '{label}' gives {blocks} blocks; at most {max} are supported", max = MAX_BLOCK_COUNT)]
    TooManyBlocks { label: String, blocks: u64 },
}

/// Upper bound on marker blocks in a key; a C32 chain at the default block size.
pub const MAX_BLOCK_COUNT: u32 = 8;

/// Encoding rules for [`SequenceKey`]s.
///
/// The N-terminal label carries a carbon count (e.g. `C16`); it is divided by
/// `block_size` to get the number of `marker` characters that prefix the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScheme {
    pub block_size: u32,
    pub marker: String,
    pub amidated_suffix: String,
    pub free_acid_suffix: String,
    pub amidation_labels: Vec<String>,
    /// Block count used when the label yields none. Unset means such labels are an error.
    pub fallback_block_count: Option<u32>,
}

impl Default for KeyScheme {
    fn default() -> Self {
        Self {
            block_size: 4,
            marker: "Z".to_string(),
            amidated_suffix: "00".to_string(),
            free_acid_suffix: "01".to_string(),
            amidation_labels: AMIDATION_LABELS.iter().map(|s| s.to_string()).collect(),
            fallback_block_count: None,
        }
    }
}

impl KeyScheme {
    /// Number of marker blocks encoded by an N-terminal label.
    ///
    /// The fallback covers labels without a usable carbon count. A count above
    /// [`MAX_BLOCK_COUNT`] is always an error.
    pub fn block_count(&self, n_terminus: &str) -> Result<u32, KeyError> {
        let parsed = first_integer(n_terminus).map(|carbons| carbons / u64::from(self.block_size.max(1)));
        match parsed {
            Some(count) if count > u64::from(MAX_BLOCK_COUNT) => Err(KeyError::TooManyBlocks {
                label: n_terminus.to_string(),
                blocks: count,
            }),
            Some(count) if count > 0 => Ok(count as u32),
            other => match self.fallback_block_count {
                Some(fallback) => Ok(fallback),
                None if other.is_none() => Err(KeyError::MissingBlockCount(n_terminus.to_string())),
                None => Err(KeyError::ZeroBlocks {
                    label: n_terminus.to_string(),
                    block_size: self.block_size,
                }),
            },
        }
    }

    pub fn is_amidated(&self, c_terminus: &str) -> bool {
        let label = label_key(c_terminus);
        self.amidation_labels
            .iter()
            .any(|candidate| label_key(candidate) == label)
    }

    /// Builds the key `marker × blocks + SEQUENCE + suffix`.
    pub fn encode(
        &self,
        n_terminus: &str,
        sequence: &str,
        c_terminus: &str,
    ) -> Result<SequenceKey, KeyError> {
        let blocks = self.block_count(n_terminus)?;
        let suffix = if self.is_amidated(c_terminus) {
            &self.amidated_suffix
        } else {
            &self.free_acid_suffix
        };
        Ok(SequenceKey(format!(
            "{}{}{}",
            self.marker.repeat(blocks as usize),
            sequence.trim().to_uppercase(),
            suffix
        )))
    }
}

/// First run of ASCII digits; runs too long for `u64` saturate.
fn first_integer(label: &str) -> Option<u64> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}
