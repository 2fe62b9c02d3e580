//! # Core Models Module
//!
//! Plain data shared by every stage of the pipeline.
//!
//! - [`table`] - Row-aligned string tables with declared, unique columns
//! - [`record`] - Property records and first-seen column discovery
//! - [`bound`] - Concentration intervals before and after unit conversion
//! - [`columns`] - Well-known column names

pub mod bound;
pub mod columns;
pub mod record;
pub mod table;
