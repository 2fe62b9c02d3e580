//! # Core Module
//!
//! Stateless building blocks of the normalization engine.
//!
//! ## Architecture
//!
//! - **Data Representation** ([`models`]) - Tables, property records and concentration bounds
//! - **Text Grammars** ([`parsing`]) - Concentration strings and species descriptors
//! - **Unit Conversion** ([`units`]) - Concentration units and conversion to micromolar
//! - **Peptide Chemistry** ([`chemistry`]) - Molecular mass, sequence keys and ionization
//! - **File I/O** ([`io`]) - CSV and whitespace tables, auxiliary lookups and peptide cards
//!
//! Nothing in this layer keeps state between calls; tables and configuration values
//! are passed in explicitly.

pub mod chemistry;
pub mod io;
pub mod models;
pub mod parsing;
pub mod units;
pub mod utils;
