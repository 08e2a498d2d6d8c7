//! Data types for the rail calculator: rails, code widths, polarity handling,
//! linear calibration parameters and bench presets.

use core::fmt;
use core::str::FromStr;

use crate::error::UnknownRail;

/// Panel supply rails the calculator knows about.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Rail {
    /// Gate-high supply.
    Vgh,
    /// Gate-low supply. The only rail with polarity forcing semantics.
    Vgl,
    /// Common voltage.
    Vcom,
}

impl Rail {
    pub const ALL: [Rail; 3] = [Rail::Vgh, Rail::Vgl, Rail::Vcom];

    /// Canonical uppercase name, as used in profile catalogs and CSV headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rail::Vgh => "VGH",
            Rail::Vgl => "VGL",
            Rail::Vcom => "VCOM",
        }
    }
}

impl fmt::Display for Rail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rail {
    type Err = UnknownRail;

    /// Case-insensitive parse of a rail name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Rail::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| UnknownRail(s.to_string()))
    }
}

/// Integer encoding of a raw code as stored in the panel's EEPROM/registers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WidthConfig {
    /// Code width in bits: 8 or 16.
    pub bits: u8,
    /// Two's-complement interpretation when set.
    pub signed: bool,
    /// Byte order of the stored form. Informational only: codes reach the
    /// engine as already-parsed integers, never as byte buffers.
    pub little_endian: bool,
}

impl WidthConfig {
    pub const U8: Self = Self {
        bits: 8,
        signed: false,
        little_endian: false,
    };
    pub const S8: Self = Self {
        bits: 8,
        signed: true,
        little_endian: false,
    };
    pub const U16LE: Self = Self {
        bits: 16,
        signed: false,
        little_endian: true,
    };
    pub const S16LE: Self = Self {
        bits: 16,
        signed: true,
        little_endian: true,
    };

    /// Resolve a width selector token such as `u8`, `s8`, `u16le` or `s16le`.
    ///
    /// 16-bit if the token contains `16`, signed if it starts with `s`,
    /// little-endian if it contains `le`. There is no error path: anything
    /// unrecognized resolves to 8-bit unsigned, matching the tool's
    /// forgiving handling of hand-typed selectors.
    pub fn from_token(token: &str) -> Self {
        let t = token.trim().to_ascii_lowercase();
        Self {
            bits: if t.contains("16") { 16 } else { 8 },
            signed: t.starts_with('s'),
            little_endian: t.contains("le"),
        }
    }

    /// Largest unsigned value representable at this width.
    pub fn max_unsigned(&self) -> i64 {
        (1i64 << self.bits) - 1
    }

    /// Representable display range: `[0, 2^bits - 1]` unsigned,
    /// `[-2^(bits-1), 2^(bits-1) - 1]` signed.
    pub fn code_range(&self) -> (i64, i64) {
        if self.signed {
            let half = 1i64 << (self.bits - 1);
            (-half, half - 1)
        } else {
            (0, self.max_unsigned())
        }
    }
}

impl Default for WidthConfig {
    fn default() -> Self {
        Self::U8
    }
}

/// How the VGL rail's sign is enforced during conversion.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VglPolarity {
    /// Force positive conversion results negative for VGL (gate-low rails are
    /// negative on real panels; a positive result means miscalibration).
    Negative,
    /// Leave results untouched.
    AsIs,
}

impl VglPolarity {
    /// Resolve a polarity token. Only `negative` (case-insensitive) selects
    /// forcing; every other token means no special handling.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("negative") {
            VglPolarity::Negative
        } else {
            VglPolarity::AsIs
        }
    }
}

impl Default for VglPolarity {
    fn default() -> Self {
        VglPolarity::Negative
    }
}

/// Linear calibration model `V = a * code + b`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearParams {
    /// Slope in volts per code step.
    pub a: f64,
    /// Intercept in volts.
    pub b: f64,
}

impl LinearParams {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }
}

/// One calibration sample of a lookup table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LutPoint {
    /// Raw digital code.
    pub code: i64,
    /// Measured voltage at that code.
    pub volts: f64,
}

/// Bench preset: a known-good starting configuration for one rail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RailPreset {
    pub rail: Rail,
    pub width: WidthConfig,
    pub params: LinearParams,
    pub vgl_polarity: VglPolarity,
}

/// Repair-bench starting points for the common rails.
pub const RAIL_PRESETS: [RailPreset; 2] = [
    // VGH: 16-bit little-endian unsigned, 0.2 V per step.
    RailPreset {
        rail: Rail::Vgh,
        width: WidthConfig::U16LE,
        params: LinearParams::new(0.2, 0.0),
        vgl_polarity: VglPolarity::Negative,
    },
    // VGL: signed 8-bit, -0.2 V per step.
    RailPreset {
        rail: Rail::Vgl,
        width: WidthConfig::S8,
        params: LinearParams::new(-0.2, 0.0),
        vgl_polarity: VglPolarity::Negative,
    },
];

/// Sample VGL lookup table in `hex,dec,volts` form, as measured on a bench
/// panel. The first column is the code in hex, the second the same code in
/// decimal, the third the measured voltage.
pub const SAMPLE_VGL_LUT: &str = "\
0x1E,30,-6.5
0x2E,46,-9.3
0x31,49,-10.0
0x38,56,-5.42
0x3E,62,-12.0
0x42,66,-13.0
0x46,70,-14.0
0x4A,74,-15.0
0x4E,78,-16.0
0x52,82,-17.0
0x56,86,-18.0";
