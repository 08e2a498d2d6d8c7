//! Two-point calibration: solve the linear model from two measured
//! (code, voltage) pairs, and decompose solved parameters into the
//! scale/offset/sign form profile catalogs store.

use crate::conversion::parse_code;
use crate::data_types::LinearParams;
use crate::error::CalibrationError;

/// Solve `V = a * code + b` exactly from two measurements. Code inputs are
/// raw strings (hex or decimal), as typed on the bench.
///
/// Rejected outright, with no partial result: unparsable codes, non-finite
/// voltages, and coincident codes (undefined slope).
pub fn solve_two_point(
    code1: &str,
    volts1: f64,
    code2: &str,
    volts2: f64,
) -> Result<LinearParams, CalibrationError> {
    let c1 = parse_code(code1)?;
    let c2 = parse_code(code2)?;
    if !volts1.is_finite() || !volts2.is_finite() {
        return Err(CalibrationError::NonFiniteVoltage);
    }
    if c1 == c2 {
        return Err(CalibrationError::CoincidentPoints);
    }
    let a = (volts2 - volts1) / (c2 - c1) as f64;
    let b = volts1 - a * c1 as f64;
    Ok(LinearParams::new(a, b))
}

/// Catalog form of solved linear parameters: magnitude, intercept and sign
/// kept separately, the way panel profiles store them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedProfile {
    pub scale: f64,
    pub offset: f64,
    pub sign: i8,
}

impl DerivedProfile {
    /// Decompose solved parameters. `to_linear` of the result reproduces the
    /// input exactly (IEEE abs and negate are exact).
    pub fn from_linear(params: LinearParams) -> Self {
        Self {
            scale: params.a.abs(),
            offset: params.b,
            sign: if params.a < 0.0 { -1 } else { 1 },
        }
    }

    /// Recompose into the linear model: `a = scale * sign`, `b = offset`.
    pub fn to_linear(&self) -> LinearParams {
        LinearParams::new(self.scale * f64::from(self.sign), self.offset)
    }
}
