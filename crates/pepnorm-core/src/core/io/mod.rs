//! Reading and writing the tables and records exchanged with other pipeline stages.
//!
//! Tabular formats share the [`traits::TabularFile`] interface; peptide cards are
//! JSON documents read with `serde_json`.

pub mod auxiliary;
pub mod cards;
pub mod csv;
pub mod traits;
pub mod whitespace;
