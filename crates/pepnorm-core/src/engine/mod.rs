//! # Engine Module
//!
//! Run-level machinery shared by the workflows: the immutable configuration, the
//! error taxonomy, activity classification, table joining and run reporting.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Chemistry tables, key scheme, pH and activity threshold
//! - **Error Handling** ([`error`]) - Fatal, table-level failures
//! - **Classification** ([`classify`]) - Threshold labelling of converted concentrations
//! - **Joining** ([`join`]) - Left joins keyed by identifier or sequence key
//! - **Reporting** ([`report`]) - Counts of non-fatal per-row failures
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events

pub mod classify;
pub mod config;
pub mod error;
pub mod join;
pub mod progress;
pub mod report;
