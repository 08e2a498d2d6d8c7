//! CSV voltage-log loading and summary statistics.
//!
//! Logs are `timestamp,vgh,vgl,vcom` CSV exports from a bench logger.
//! Loading is forgiving: short rows are skipped, unparsable numeric fields
//! become NaN samples. Only a missing header column or a log with no data
//! rows is an error.

use crate::data_types::Rail;
use crate::error::TelemetryError;

/// Columns a voltage log must carry, in the order the series are returned.
pub const REQUIRED_COLUMNS: [&str; 4] = ["timestamp", "vgh", "vgl", "vcom"];

/// How many leading rows a summary quotes verbatim.
pub const SUMMARY_HEAD_ROWS: usize = 10;

/// Parsed time series of the three rails.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoltageLog {
    pub timestamps: Vec<String>,
    pub vgh: Vec<f64>,
    pub vgl: Vec<f64>,
    pub vcom: Vec<f64>,
}

impl VoltageLog {
    /// Parse CSV text. The header is located by column name, any order,
    /// extra columns ignored. Data rows shorter than the header are
    /// skipped; numeric fields that fail to parse are kept as NaN so the
    /// row count stays aligned with the timestamps.
    pub fn parse_csv(text: &str) -> Result<Self, TelemetryError> {
        let lines: Vec<&str> = text.trim().lines().collect();
        if lines.len() < 2 {
            return Err(TelemetryError::MissingData);
        }
        let header: Vec<&str> = lines[0].split(',').map(str::trim).collect();
        let mut indices = [0usize; 4];
        for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = header
                .iter()
                .position(|h| *h == name)
                .ok_or(TelemetryError::MissingColumn(name))?;
        }
        let [ts_at, vgh_at, vgl_at, vcom_at] = indices;

        let mut log = Self::default();
        for line in &lines[1..] {
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < header.len() {
                continue;
            }
            log.timestamps.push(fields[ts_at].trim().to_string());
            log.vgh.push(parse_sample(fields[vgh_at]));
            log.vgl.push(parse_sample(fields[vgl_at]));
            log.vcom.push(parse_sample(fields[vcom_at]));
        }
        Ok(log)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Series for one rail.
    pub fn series(&self, rail: Rail) -> &[f64] {
        match rail {
            Rail::Vgh => &self.vgh,
            Rail::Vgl => &self.vgl,
            Rail::Vcom => &self.vcom,
        }
    }

    /// Summarize: point count, per-rail finite-sample extremes, and the
    /// first rows verbatim.
    pub fn summary(&self) -> LogSummary {
        let head = (0..self.len().min(SUMMARY_HEAD_ROWS))
            .map(|i| SummaryRow {
                timestamp: self.timestamps[i].clone(),
                vgh: self.vgh[i],
                vgl: self.vgl[i],
                vcom: self.vcom[i],
            })
            .collect();
        LogSummary {
            points: self.len(),
            vgh: RangeStats::of(&self.vgh),
            vgl: RangeStats::of(&self.vgl),
            vcom: RangeStats::of(&self.vcom),
            head,
        }
    }
}

fn parse_sample(field: &str) -> f64 {
    field.trim().parse().unwrap_or(f64::NAN)
}

/// Finite-sample extremes of one series.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeStats {
    pub min: f64,
    pub max: f64,
}

impl RangeStats {
    /// `None` when the series has no finite sample.
    pub fn of(series: &[f64]) -> Option<Self> {
        let mut stats: Option<Self> = None;
        for &v in series.iter().filter(|v| v.is_finite()) {
            stats = Some(match stats {
                None => Self { min: v, max: v },
                Some(s) => Self {
                    min: s.min.min(v),
                    max: s.max.max(v),
                },
            });
        }
        stats
    }

    /// Peak-to-peak swing.
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// One quoted data row.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub timestamp: String,
    pub vgh: f64,
    pub vgl: f64,
    pub vcom: f64,
}

/// Data summary a diagnostic prompt embeds.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LogSummary {
    pub points: usize,
    pub vgh: Option<RangeStats>,
    pub vgl: Option<RangeStats>,
    pub vcom: Option<RangeStats>,
    pub head: Vec<SummaryRow>,
}

impl LogSummary {
    /// Plain-text rendering: counts, per-rail ranges to two decimals, and
    /// the leading rows as a bullet list.
    pub fn render(&self) -> String {
        let mut out = format!("Data points: {}\n", self.points);
        for (name, range) in [("VGH", &self.vgh), ("VGL", &self.vgl), ("VCOM", &self.vcom)] {
            match range {
                Some(r) => {
                    out.push_str(&format!("{name} range: {:.2}V to {:.2}V\n", r.min, r.max));
                }
                None => out.push_str(&format!("{name} range: no finite samples\n")),
            }
        }
        out.push_str(&format!(
            "\nFirst {} data points (timestamp, VGH, VGL, VCOM):\n",
            self.head.len()
        ));
        for row in &self.head {
            out.push_str(&format!(
                "- {}, {:.2}V, {:.2}V, {:.2}V\n",
                row.timestamp, row.vgh, row.vgl, row.vcom
            ));
        }
        out
    }
}
