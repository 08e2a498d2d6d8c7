//! Per-call conversion facade.
//!
//! A [`RailConverter`] bundles everything one conversion needs — rail,
//! width, polarity handling and the linear-or-LUT mode — borrowed from
//! caller state. It holds no state of its own: LUT text is re-parsed on
//! every call, so edits to a hand-typed table take effect immediately.

use crate::conversion::{
    clamp_code, code_to_volts_linear, coerce_code, format_code_hex, parse_code,
    volts_to_code_linear,
};
use crate::data_types::{LinearParams, Rail, RailPreset, VglPolarity, WidthConfig};
use crate::error::ConvertError;
use crate::lut::LutTable;

/// How codes map to volts for one conversion call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConversionMode<'a> {
    /// Linear model `V = a * code + b`.
    Linear(LinearParams),
    /// Piecewise lookup table, parsed from the borrowed text on each call.
    Lut(&'a str),
}

/// Result of a code → voltage call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoltageReading {
    /// The width-coerced code actually converted.
    pub code: i64,
    pub volts: f64,
}

/// Result of a voltage → code call.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeEstimate {
    /// Nearest integer code, before display clamping. May lie outside the
    /// width's representable range for out-of-range voltages.
    pub code: i64,
    /// Saturating-clamped to the width's representable range.
    pub display_code: i64,
    /// Hex rendering of the clamped code, masked to width.
    pub hex: String,
}

/// One conversion call's full configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RailConverter<'a> {
    pub rail: Rail,
    pub width: WidthConfig,
    pub vgl_polarity: VglPolarity,
    pub mode: ConversionMode<'a>,
}

impl RailConverter<'_> {
    /// Start from a bench preset (linear mode).
    pub fn from_preset(preset: &RailPreset) -> RailConverter<'static> {
        RailConverter {
            rail: preset.rail,
            width: preset.width,
            vgl_polarity: preset.vgl_polarity,
            mode: ConversionMode::Linear(preset.params),
        }
    }

    /// Convert a raw code string to volts: parse, coerce to width, then map
    /// through the configured mode.
    pub fn code_to_volts(&self, raw: &str) -> Result<VoltageReading, ConvertError> {
        let code = coerce_code(parse_code(raw)?, self.width);
        let volts = match self.mode {
            ConversionMode::Linear(params) => {
                code_to_volts_linear(code, self.rail, params, self.vgl_polarity)
            }
            ConversionMode::Lut(text) => LutTable::parse(text)
                .volts_at(code)
                .ok_or(ConvertError::EmptyTable)?,
        };
        Ok(VoltageReading { code, volts })
    }

    /// Convert a measured voltage to the nearest representable code, with a
    /// saturating display clamp and hex rendering.
    pub fn volts_to_code(&self, volts: f64) -> Result<CodeEstimate, ConvertError> {
        if !volts.is_finite() {
            return Err(ConvertError::NonFiniteVoltage);
        }
        let code = match self.mode {
            ConversionMode::Linear(params) => {
                volts_to_code_linear(volts, self.rail, params, self.vgl_polarity)
                    .ok_or(ConvertError::ZeroSlope)?
                    .round() as i64
            }
            ConversionMode::Lut(text) => {
                let table = LutTable::parse(text);
                if table.is_empty() {
                    return Err(ConvertError::EmptyTable);
                }
                table.code_at(volts).ok_or(ConvertError::NoSegment(volts))?
            }
        };
        let display_code = clamp_code(code, self.width);
        let hex = format_code_hex(display_code, self.width);
        Ok(CodeEstimate {
            code,
            display_code,
            hex,
        })
    }
}
