//! Code↔voltage calculator for TV panel PMIC rails.
//!
//! Converts raw EEPROM/register codes to VGH/VGL/VCOM voltages and back,
//! through a linear calibration model or a hand-edited lookup table, with
//! two-point calibration solving, panel-profile pre-fill, CSV voltage-log
//! summaries and a pluggable diagnostic-report backend.
//!
//! The conversion engine is pure and synchronous: every operation is a
//! deterministic function of its explicit inputs, safe to call concurrently
//! from independent callers.

pub mod analysis;
pub mod calculator;
pub mod calibration;
pub mod conversion;
pub mod data_types;
pub mod error;
pub mod lut;
#[cfg(feature = "serde")]
pub mod profiles;
pub mod telemetry;

pub use calculator::{ConversionMode, RailConverter};
pub use data_types::{LinearParams, Rail, VglPolarity, WidthConfig};
pub use error::ConvertError;
pub use lut::LutTable;
pub use telemetry::VoltageLog;
