//! Panel-profile catalog: named per-panel, per-rail linear coefficients.
//!
//! The catalog is read-only external input (a fetched or bundled JSON
//! document) used to pre-fill the linear model. Calibration results can be
//! applied in memory; nothing is ever written back to disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calibration::DerivedProfile;
use crate::data_types::{LinearParams, Rail};
use crate::error::CatalogError;

fn default_sign() -> i8 {
    1
}

fn default_bytes() -> u8 {
    1
}

/// Per-rail linear coefficients as stored in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    /// Slope magnitude in volts per code step.
    pub scale: f64,
    /// Intercept in volts.
    #[serde(default)]
    pub offset: f64,
    /// Slope sign: 1 or -1.
    #[serde(default = "default_sign")]
    pub sign: i8,
    /// Stored code width in bytes. Informational.
    #[serde(default = "default_bytes")]
    pub bytes: u8,
}

impl ProfileEntry {
    /// The linear model this entry pre-fills: `a = scale * sign`,
    /// `b = offset`.
    pub fn linear_params(&self) -> LinearParams {
        LinearParams::new(self.scale * f64::from(self.sign), self.offset)
    }
}

/// Catalog of named panels, keyed by panel id, then rail name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileCatalog {
    panels: BTreeMap<String, BTreeMap<String, ProfileEntry>>,
}

impl ProfileCatalog {
    /// Load from catalog JSON: an object of panel ids, each an object of
    /// rail names to entries.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Panel ids in sorted order (what a selector UI lists).
    pub fn panel_ids(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn entry(&self, panel: &str, rail: Rail) -> Option<&ProfileEntry> {
        self.panels.get(panel)?.get(rail.as_str())
    }

    /// Pre-fill linear parameters for a panel/rail, if the catalog has them.
    pub fn linear_params(&self, panel: &str, rail: Rail) -> Option<LinearParams> {
        Some(self.entry(panel, rail)?.linear_params())
    }

    /// Apply a calibration result in memory. An existing entry keeps its
    /// stored byte width; a new one defaults to 1 byte.
    pub fn apply(&mut self, panel: &str, rail: Rail, derived: &DerivedProfile) {
        let rails = self.panels.entry(panel.to_string()).or_default();
        let entry = rails
            .entry(rail.as_str().to_string())
            .or_insert(ProfileEntry {
                scale: 0.0,
                offset: 0.0,
                sign: 1,
                bytes: default_bytes(),
            });
        entry.scale = derived.scale;
        entry.offset = derived.offset;
        entry.sign = derived.sign;
    }
}
