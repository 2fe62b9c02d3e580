use thiserror::Error;

use super::config::ConfigError;
use crate::core::chemistry::mass::MassTableLoadError;
use crate::core::io::cards::CardError;
use crate::core::io::traits::TableError;
use crate::core::models::table::SchemaError;

/// Fatal, table-level failures. Per-row problems never surface here; they are
/// counted in a [`RunSummary`](super::report::RunSummary) instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Table error: {source}")]
    Table {
        #[from]
        source: TableError,
    },

    #[error("Schema error: {source}")]
    Schema {
        #[from]
        source: SchemaError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Peptide card error: {source}")]
    Cards {
        #[from]
        source: CardError,
    },

    #[error("Mass table error: {source}")]
    MassTable {
        #[from]
        source: MassTableLoadError,
    },
}
