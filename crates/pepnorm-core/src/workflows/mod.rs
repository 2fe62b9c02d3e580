//! # Workflows Module
//!
//! Table-level entry points of the pipeline. Each workflow takes whole tables,
//! an [`EngineConfig`](crate::engine::config::EngineConfig) and a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter), and returns the
//! output table together with a [`RunSummary`](crate::engine::report::RunSummary).
//!
//! ## Architecture
//!
//! - **Collection** ([`collect`]) - Physicochemical and activity tables from peptide cards
//! - **Normalization** ([`normalize`]) - Concentration bounds, micromolar values, species and labels
//! - **Lipophilicity** ([`lipophilicity`]) - `logD` from `logP` at a configured pH
//! - **Merging** ([`merge`]) - Unified and intrinsic property tables
//! - **Peptide lists** ([`peptide_list`]) - Deduplicated sequence keys for downstream simulation
//!
//! Per-row failures never abort a workflow. Only missing tables or columns do.

pub mod collect;
pub mod lipophilicity;
pub mod merge;
pub mod normalize;
pub mod peptide_list;
