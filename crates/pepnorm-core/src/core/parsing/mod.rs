//! Text grammars for free-form fields of activity records.

pub mod concentration;
pub mod species;
