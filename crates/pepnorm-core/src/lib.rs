//! # pepnorm
//!
//! Normalization of antimicrobial peptide activity and property data into tables
//! ready for modelling.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** Stateless pieces: the in-memory [`Table`](core::models::table::Table),
//!   concentration parsing, unit conversion, molecular mass, sequence keys, the
//!   ionization model and the CSV/whitespace/JSON readers.
//!
//! - **[`engine`]: Run Machinery.** The validated, immutable configuration, the error
//!   taxonomy, activity classification, the dataset joiner and run summaries.
//!
//! - **[`workflows`]: The Public API.** Complete table-to-table procedures such as
//!   activity normalization and property merging.
//!
//! Everything is synchronous and operates on whole tables in memory.

pub mod core;
pub mod engine;
pub mod workflows;
