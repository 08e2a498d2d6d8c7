//! Error definitions for the rail calculator.
//!
//! Engine failures are local and non-fatal: malformed data content surfaces
//! as a typed error (or `None` from the low-level helpers), never a panic.

use thiserror::Error;

/// Raw code text matched neither the `0x`-prefixed hex pattern nor the
/// optionally signed decimal pattern.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("not a hex (0x..) or decimal code: {0:?}")]
pub struct CodeParseError(pub String);

/// Rail name outside the known set.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown rail name: {0:?}")]
pub struct UnknownRail(pub String);

/// Failures of a single conversion call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConvertError {
    /// The raw code string did not parse.
    #[error(transparent)]
    Code(#[from] CodeParseError),
    /// The target voltage was NaN or infinite.
    #[error("voltage is not a finite number")]
    NonFiniteVoltage,
    /// The lookup table had no usable rows.
    #[error("lookup table has no usable rows")]
    EmptyTable,
    /// Zero slope: the voltage does not determine a code.
    #[error("slope is zero; voltage does not determine a code")]
    ZeroSlope,
    /// No table segment spans the target voltage and it is not clampable to
    /// either table end.
    #[error("no table segment spans {0} V")]
    NoSegment(f64),
}

/// Rejections of the two-point calibration solver. No partial result is
/// produced on any of these.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CalibrationError {
    /// A code string did not parse.
    #[error(transparent)]
    Code(#[from] CodeParseError),
    /// A measured voltage was NaN or infinite.
    #[error("measured voltage is not a finite number")]
    NonFiniteVoltage,
    /// Both points share the same code, so the slope is undefined.
    #[error("calibration points share the same code")]
    CoincidentPoints,
}

/// Failures while loading a profile catalog.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while loading a CSV voltage log.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TelemetryError {
    /// The input held fewer than a header row plus one data row.
    #[error("log needs a header row and at least one data row")]
    MissingData,
    /// A required column was absent from the header.
    #[error("required column {0:?} not found in header")]
    MissingColumn(&'static str),
}

/// Report driver failures, generic over the text backend's error.
#[derive(Debug)]
pub enum ReportError<E> {
    /// The voltage log held no data points.
    EmptyLog,
    /// The text backend failed; the underlying error is carried verbatim.
    Generator(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for ReportError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportError::EmptyLog => write!(f, "voltage log holds no data points"),
            ReportError::Generator(e) => write!(f, "text generation failed: {e:?}"),
        }
    }
}

impl<E: core::fmt::Debug> std::error::Error for ReportError<E> {}
