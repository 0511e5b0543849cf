//! Conversions between the three numeric spaces used by the painter:
//! *measure* (a physical unit picked by the user), *real* (world units the
//! renderer works in) and *pixel* (device pixels).
//!
//! Every conversion reads an explicit [`MeasureConfig`] and rounds the result
//! to its configured precision. Real values from a measure keep the extra
//! digits the unit needs so that reading them back is lossless at that
//! precision.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_PIXELS_PER_REAL, DEFAULT_PRECISION, DEFAULT_SCALE, FLOAT_DIGITS};
use crate::error::{CellPaintError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Inch,
    Foot,
    Meter,
    Centimeter,
    Millimeter,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Inch,
        Unit::Foot,
        Unit::Meter,
        Unit::Centimeter,
        Unit::Millimeter,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            Unit::Inch => "inch",
            Unit::Foot => "ft",
            Unit::Meter => "m",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
        }
    }

    /// Centimeters per one unit; real = measure * centimeters * scale.
    #[inline]
    fn centimeters(self) -> f64 {
        match self {
            Unit::Foot => 30.480016459203096,
            Unit::Inch => 2.540001371600258,
            Unit::Millimeter => 0.10000005400001015,
            Unit::Centimeter => 1.0,
            Unit::Meter => 100.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Unit {
    type Err = CellPaintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "inch" | "in" => Ok(Unit::Inch),
            "ft" | "foot" | "feet" => Ok(Unit::Foot),
            "m" | "meter" => Ok(Unit::Meter),
            "cm" | "centimeter" => Ok(Unit::Centimeter),
            "mm" | "millimeter" => Ok(Unit::Millimeter),
            other => Err(CellPaintError::UnknownUnit(other.to_string())),
        }
    }
}

/// Immutable measurement settings threaded through every conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasureConfig {
    /// Display unit used when a conversion does not name one.
    pub unit: Unit,
    /// Real units per centimeter.
    pub scale: f64,
    /// Decimal digits kept in converted values.
    pub precision: u32,
    /// Device pixels per real unit.
    pub pixels_per_real: f64,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Centimeter,
            scale: DEFAULT_SCALE,
            precision: DEFAULT_PRECISION,
            pixels_per_real: DEFAULT_PIXELS_PER_REAL,
        }
    }
}

impl MeasureConfig {
    pub fn with_unit(self, unit: Unit) -> Self {
        Self { unit, ..self }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub fn with_precision(self, precision: u32) -> Self {
        Self { precision, ..self }
    }

    pub fn with_pixels_per_real(self, pixels_per_real: f64) -> Self {
        Self {
            pixels_per_real,
            ..self
        }
    }

    /// Apply one host-provided `key = value` setting.
    ///
    /// Numbers are trimmed to [`FLOAT_DIGITS`]; unparsable text reads as zero,
    /// which a positive-only setting then rejects.
    pub fn with_setting(self, key: &str, value: &str) -> Result<Self> {
        match key.trim() {
            "unit" => Ok(self.with_unit(value.parse()?)),
            "scale" => positive(trim_float(value, FLOAT_DIGITS)?).map(|v| self.with_scale(v)),
            "precision" => {
                let digits = trim_float(value, 0)?;
                if !(0.0..=f64::from(FLOAT_DIGITS)).contains(&digits) {
                    return Err(CellPaintError::InvalidNumber { value: digits });
                }
                Ok(self.with_precision(digits as u32))
            }
            "pixels_per_real" => {
                positive(trim_float(value, FLOAT_DIGITS)?).map(|v| self.with_pixels_per_real(v))
            }
            other => Err(CellPaintError::UnknownSetting(other.to_string())),
        }
    }
}

fn positive(value: f64) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CellPaintError::InvalidNumber { value })
    }
}

/// Round half away from zero to `digits` decimals.
///
/// NaN is coerced to zero; an infinite value (an infinite input, or a
/// division by a zero scale upstream) is rejected. Values too large to carry
/// `digits` decimals are already whole and come back unchanged.
pub fn round_to(value: f64, digits: u32) -> Result<f64> {
    let value = if value.is_nan() { 0.0 } else { value };
    if !value.is_finite() {
        return Err(CellPaintError::InvalidNumber { value });
    }
    let factor = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return Ok(value);
    }
    Ok(scaled.round() / factor)
}

/// Parse a user-entered number and round it. Empty or unparsable text is zero.
pub fn trim_float(input: &str, digits: u32) -> Result<f64> {
    let value = input.trim().parse::<f64>().unwrap_or(0.0);
    round_to(value, digits)
}

/// Decimals kept on the real side of a `unit` conversion.
///
/// A unit worth less than one real unit needs extra digits, otherwise the
/// measure read back loses part of `precision`.
fn real_digits(config: &MeasureConfig, unit: Unit) -> u32 {
    let per_measure = unit.centimeters() * config.scale;
    if !(per_measure.is_finite() && per_measure > 0.0) {
        return config.precision;
    }
    let extra = (-per_measure.log10())
        .ceil()
        .clamp(0.0, f64::from(FLOAT_DIGITS));
    config.precision.saturating_add(extra as u32)
}

/// Measure -> real. `unit` defaults to the configured display unit.
pub fn real_from_measure(config: &MeasureConfig, measure: f64, unit: Option<Unit>) -> Result<f64> {
    let unit = unit.unwrap_or(config.unit);
    round_to(
        measure * unit.centimeters() * config.scale,
        real_digits(config, unit),
    )
}

/// Real -> measure. `unit` defaults to the configured display unit.
pub fn measure_from_real(config: &MeasureConfig, real: f64, unit: Option<Unit>) -> Result<f64> {
    let unit = unit.unwrap_or(config.unit);
    round_to(real / (unit.centimeters() * config.scale), config.precision)
}

/// Like [`real_from_measure`] but with a unit name coming from the host.
///
/// An empty name means the display unit. Names that are not a known unit pass
/// the measure through unchanged.
pub fn real_from_measure_named(config: &MeasureConfig, measure: f64, unit: &str) -> Result<f64> {
    if unit.trim().is_empty() {
        return real_from_measure(config, measure, None);
    }
    match unit.parse::<Unit>() {
        Ok(u) => real_from_measure(config, measure, Some(u)),
        Err(_) => {
            log::debug!("[dimension] unrecognized unit {:?}, passing {} through", unit, measure);
            Ok(measure)
        }
    }
}

/// Like [`measure_from_real`] but with a unit name coming from the host.
pub fn measure_from_real_named(config: &MeasureConfig, real: f64, unit: &str) -> Result<f64> {
    if unit.trim().is_empty() {
        return measure_from_real(config, real, None);
    }
    match unit.parse::<Unit>() {
        Ok(u) => measure_from_real(config, real, Some(u)),
        Err(_) => {
            log::debug!("[dimension] unrecognized unit {:?}, passing {} through", unit, real);
            Ok(real)
        }
    }
}

pub fn real_from_pixel(config: &MeasureConfig, pixel: f64) -> Result<f64> {
    round_to(pixel / config.pixels_per_real, config.precision)
}

pub fn pixel_from_real(config: &MeasureConfig, real: f64) -> Result<f64> {
    round_to(real * config.pixels_per_real, config.precision)
}
