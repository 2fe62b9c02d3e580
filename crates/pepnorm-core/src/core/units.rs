use crate::core::models::bound::{ConcentrationBound, ConvertedBound};
use crate::core::utils::format::{SIGNIFICANT_DIGITS, format_sig};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Concentration units accepted in activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcentrationUnit {
    Micromolar,
    Millimolar,
    Nanomolar,
    Molar,
    /// µg/mL and its equivalent mg/L.
    MicrogramPerMillilitre,
    GramPerLitre,
    NanogramPerMillilitre,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown concentration unit '{0}'")]
pub struct ParseUnitError(pub String);

impl FromStr for ConcentrationUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Greek mu and the micro sign both occur in source data.
        let normalized = s.trim().replace('\u{03BC}', "\u{00B5}").to_lowercase();
        match normalized.as_str() {
            "µm" | "um" => Ok(Self::Micromolar),
            "mm" => Ok(Self::Millimolar),
            "nm" => Ok(Self::Nanomolar),
            "m" => Ok(Self::Molar),
            "µg/ml" | "ug/ml" | "mg/l" => Ok(Self::MicrogramPerMillilitre),
            "g/l" => Ok(Self::GramPerLitre),
            "ng/ml" => Ok(Self::NanogramPerMillilitre),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Micromolar => "µM",
                Self::Millimolar => "mM",
                Self::Nanomolar => "nM",
                Self::Molar => "M",
                Self::MicrogramPerMillilitre => "µg/mL",
                Self::GramPerLitre => "g/L",
                Self::NanogramPerMillilitre => "ng/mL",
            }
        )
    }
}

impl ConcentrationUnit {
    /// Converts `value` in this unit to micromolar.
    ///
    /// `mass` is the molecular mass in Da. Mass-based units divide by it in kg/mol.
    pub fn to_micromolar(&self, value: f64, mass: f64) -> f64 {
        let per_mole = mass / 1000.0;
        match self {
            Self::Micromolar => value,
            Self::Millimolar => value * 1000.0,
            Self::Nanomolar => value / 1000.0,
            Self::Molar => value * 1e6,
            Self::MicrogramPerMillilitre => value / per_mole,
            Self::GramPerLitre => value * 1000.0 / per_mole,
            Self::NanogramPerMillilitre => (value / 1000.0) / per_mole,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("No value to convert")]
    MissingValue,
    #[error("No unit given")]
    MissingUnit,
    #[error("Molecular mass is missing or not positive")]
    MissingMass,
    #[error(transparent)]
    UnknownUnit(#[from] ParseUnitError),
    #[error("Value '{0}' is not a number")]
    InvalidValue(String),
}

/// Converts a numeric value in `unit` to micromolar.
///
/// A record without a usable molecular mass is not converted, whatever its unit.
pub fn to_canonical(value: f64, unit: &str, mass: Option<f64>) -> Result<f64, ConversionError> {
    if unit.trim().is_empty() {
        return Err(ConversionError::MissingUnit);
    }
    let mass = mass
        .filter(|m| *m > 0.0 && m.is_finite())
        .ok_or(ConversionError::MissingMass)?;
    let unit: ConcentrationUnit = unit.parse()?;
    Ok(unit.to_micromolar(value, mass))
}

/// Converts a textual value, returning the micromolar value formatted to six significant digits.
///
/// Any failure yields an empty string; the cause is logged.
pub fn to_canonical_text(value: &str, unit: &str, mass: Option<f64>) -> String {
    match parse_value(value).and_then(|v| to_canonical(v, unit, mass)) {
        Ok(converted) => format_sig(converted, SIGNIFICANT_DIGITS),
        Err(ConversionError::MissingValue) => String::new(),
        Err(e) => {
            warn!("Cannot convert '{}' {}: {}", value, unit, e);
            String::new()
        }
    }
}

fn parse_value(value: &str) -> Result<f64, ConversionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::MissingValue);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConversionError::InvalidValue(trimmed.to_string()))
}

/// Converts both ends of a bound. An open end stays open.
///
/// Fails only when a present end cannot be converted. An empty bound converts to an
/// empty result without consulting the unit.
pub fn convert_bound(
    bound: &ConcentrationBound,
    unit: &str,
    mass: Option<f64>,
) -> Result<ConvertedBound, ConversionError> {
    if bound.is_empty() {
        return Ok(ConvertedBound::default());
    }
    let convert = |end: Option<f64>| end.map(|v| to_canonical(v, unit, mass)).transpose();
    Ok(ConvertedBound {
        lower: convert(bound.lower())?,
        upper: convert(bound.upper())?,
    })
}
