//! Code parsing, width coercion and linear conversion.
//!
//! Policies follow the bench tool's forgiving-input behavior: code strings
//! are strict hex-or-decimal, width tokens silently default, and the VGL
//! rail's sign is forced negative when so configured.

use crate::data_types::{LinearParams, Rail, VglPolarity, WidthConfig};
use crate::error::CodeParseError;

/// Repair-bench safe window for VGH (volts).
pub const VGH_SAFE_MIN_V: f64 = 21.0;
pub const VGH_SAFE_MAX_V: f64 = 24.0;

/// Repair-bench safe window for VGL (volts). More negative than the minimum
/// stresses the gate driver; less negative than the maximum shows as
/// horizontal banding.
pub const VGL_SAFE_MIN_V: f64 = -18.0;
pub const VGL_SAFE_MAX_V: f64 = -12.0;

/// Parse a raw code string as `0x`/`0X`-prefixed hex or optionally signed
/// decimal. Empty and whitespace-only input is a parse failure, distinct
/// from a valid zero.
pub fn parse_code(text: &str) -> Result<i64, CodeParseError> {
    let t = text.trim();
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            if let Ok(value) = i64::from_str_radix(hex, 16) {
                return Ok(value);
            }
        }
        return Err(CodeParseError(text.to_string()));
    }
    let digits = t.strip_prefix(['+', '-']).unwrap_or(t);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = t.parse::<i64>() {
            return Ok(value);
        }
    }
    Err(CodeParseError(text.to_string()))
}

/// Mask a value to the configured width, then reinterpret the bit pattern as
/// two's complement when signed.
///
/// The result lies in `[0, 2^bits - 1]` unsigned and
/// `[-2^(bits-1), 2^(bits-1) - 1]` signed. Values already in range are
/// unchanged.
pub fn coerce_code(value: i64, width: WidthConfig) -> i64 {
    let modulus = 1i64 << width.bits;
    let mut code = value & (modulus - 1);
    if width.signed && code & (modulus >> 1) != 0 {
        code -= modulus;
    }
    code
}

/// Forward linear conversion `V = a * code + b`.
///
/// For VGL with negative polarity forcing, a positive result is flipped to
/// its negative. No other rail or polarity setting is special-cased.
pub fn code_to_volts_linear(
    code: i64,
    rail: Rail,
    params: LinearParams,
    vgl_polarity: VglPolarity,
) -> f64 {
    force_vgl_negative(params.a * code as f64 + params.b, rail, vgl_polarity)
}

/// Inverse linear conversion. The VGL forcing applies to the target voltage
/// before inverting. Returns `None` when the slope is zero.
///
/// The result is a fractional code; rounding and clamping to the width's
/// representable range are the display layer's job.
pub fn volts_to_code_linear(
    volts: f64,
    rail: Rail,
    params: LinearParams,
    vgl_polarity: VglPolarity,
) -> Option<f64> {
    let target = force_vgl_negative(volts, rail, vgl_polarity);
    if params.a == 0.0 {
        return None;
    }
    Some((target - params.b) / params.a)
}

/// Flip a wrong-sign VGL value negative when forcing is configured.
fn force_vgl_negative(volts: f64, rail: Rail, polarity: VglPolarity) -> f64 {
    if rail == Rail::Vgl && polarity == VglPolarity::Negative && volts > 0.0 {
        -volts
    } else {
        volts
    }
}

/// Saturating clamp of a code to the width's representable range.
pub fn clamp_code(code: i64, width: WidthConfig) -> i64 {
    let (lo, hi) = width.code_range();
    code.clamp(lo, hi)
}

/// Hex rendering of a display code: `0x` plus the uppercase hex digits of
/// the code masked to the configured width (so negative signed codes render
/// as their stored bit pattern).
pub fn format_code_hex(code: i64, width: WidthConfig) -> String {
    format!("0x{:X}", code & width.max_unsigned())
}
