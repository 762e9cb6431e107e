//! Area conversion between metric inputs and Gujarat land units.

use serde::{Deserialize, Serialize};

use crate::types::AreaUnit;

/// Square meters per vigha.
pub const SQM_PER_VIGHA: f64 = 1618.74257;
/// Square meters per guntha.
pub const SQM_PER_GUNTHA: f64 = 101.17141056;
/// Square meters per acre.
pub const SQM_PER_ACRE: f64 = 4046.85642;
/// Square feet per square meter.
pub const SQFT_PER_SQM: f64 = 10.7639;
/// Square meters per hectare.
pub const SQM_PER_HECTARE: f64 = 10000.0;
/// Square meters per are.
pub const SQM_PER_ARE: f64 = 100.0;

/// Scalar area and the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionInput {
    /// Entered value.
    pub value: f64,
    /// Unit of `value`.
    pub unit: AreaUnit,
}

impl ConversionInput {
    /// Builds an input.
    pub fn new(value: f64, unit: AreaUnit) -> Self {
        Self { value, unit }
    }
}

/// The same area expressed in every supported unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Vigha.
    pub vigha: f64,
    /// Guntha.
    pub guntha: f64,
    /// Acre.
    pub acre: f64,
    /// Square meters.
    pub sqm: f64,
    /// Hectare.
    pub hectare: f64,
    /// Are.
    pub are: f64,
    /// Square feet.
    pub sqft: f64,
}

/// Converts `input` into every supported unit.
///
/// Never fails. Unknown units, negative values, NaN and areas too large to
/// express in square feet all normalize to a zero area, so every field of
/// the result is finite and non-negative.
pub fn convert_area(input: ConversionInput) -> ConversionResult {
    let value_in_sqm = match input.unit {
        AreaUnit::Hectare => input.value * SQM_PER_HECTARE,
        AreaUnit::Are => input.value * SQM_PER_ARE,
        AreaUnit::Sqm => input.value,
        AreaUnit::Other => 0.0,
    };

    // Areas whose square-foot figure would overflow are treated like NaN.
    let representable = value_in_sqm >= 0.0 && (value_in_sqm * SQFT_PER_SQM).is_finite();
    let value_in_sqm = if representable {
        value_in_sqm
    } else {
        0.0
    };

    from_sqm(value_in_sqm)
}

fn from_sqm(sqm: f64) -> ConversionResult {
    ConversionResult {
        vigha: sqm / SQM_PER_VIGHA,
        guntha: sqm / SQM_PER_GUNTHA,
        acre: sqm / SQM_PER_ACRE,
        sqft: sqm * SQFT_PER_SQM,
        hectare: sqm / SQM_PER_HECTARE,
        are: sqm / SQM_PER_ARE,
        sqm,
    }
}

/// Total square meters of a 7/12 hectare/are/sqm triple.
///
/// Each field is parsed leniently; blank or unparseable text counts as zero.
pub fn composite_total_sqm(hectare: &str, are: &str, sqm: &str) -> f64 {
    let field = |raw: &str| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0);
    field(hectare) * SQM_PER_HECTARE + field(are) * SQM_PER_ARE + field(sqm)
}
