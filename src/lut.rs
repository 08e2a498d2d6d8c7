//! Lookup-table parsing, interpolation and inversion.
//!
//! Tables are hand-edited text, one `code,[alt,]volts` row per line with
//! `#` comments. Parsing is best-effort: rows that do not yield a finite
//! code and voltage are skipped (and logged), never fatal.

use log::warn;

use crate::conversion::parse_code;
use crate::data_types::LutPoint;

/// A parsed lookup table, sorted ascending by code.
///
/// Duplicate codes are kept, not merged; the stable sort leaves the
/// first-in-input duplicate as the left node, and zero-width segments
/// resolve to that node's voltage. Inversion assumes the voltage sequence
/// is monotonic in code; on a non-monotonic table the first segment in
/// ascending-code order that spans the target wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LutTable {
    points: Vec<LutPoint>,
}

impl LutTable {
    /// Parse table text. Per non-empty, non-`#` line: split on commas, trim,
    /// require at least two fields. The code comes from the first field,
    /// falling back to the second when the first does not parse (some tables
    /// lead with an alternate rendering of the code). The voltage comes from
    /// the third field when present, else the second.
    pub fn parse(text: &str) -> Self {
        let mut points = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let row = line.trim();
            if row.is_empty() || row.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            if fields.len() < 2 {
                warn!("lut line {}: fewer than two fields, skipped", index + 1);
                continue;
            }
            let code = parse_code(fields[0]).or_else(|_| parse_code(fields[1]));
            let volts_field = if fields.len() >= 3 { fields[2] } else { fields[1] };
            match (code, volts_field.parse::<f64>()) {
                (Ok(code), Ok(volts)) if volts.is_finite() => {
                    points.push(LutPoint { code, volts });
                }
                _ => warn!("lut line {}: unparsable row {:?}, skipped", index + 1, row),
            }
        }
        // Stable: equal codes keep input order.
        points.sort_by_key(|p| p.code);
        Self { points }
    }

    /// Build from already-parsed points (sorted the same way).
    pub fn from_points(mut points: Vec<LutPoint>) -> Self {
        points.sort_by_key(|p| p.code);
        Self { points }
    }

    pub fn points(&self) -> &[LutPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Piecewise-linear voltage at `code`.
    ///
    /// Codes at or beyond the table ends clamp to the end voltages rather
    /// than extrapolate. Returns `None` only for an empty table.
    pub fn volts_at(&self, code: i64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if code <= first.code {
            return Some(first.volts);
        }
        if code >= last.code {
            return Some(last.volts);
        }
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if code >= a.code && code <= b.code {
                if b.code == a.code {
                    return Some(a.volts);
                }
                let t = (code - a.code) as f64 / (b.code - a.code) as f64;
                return Some(a.volts + t * (b.volts - a.volts));
            }
        }
        None
    }

    /// Code whose interpolated voltage equals `volts`, rounded to the
    /// nearest integer (codes are discrete; this rounding is part of the
    /// algorithm, not display formatting).
    ///
    /// The first segment whose voltage span contains the target wins. When
    /// no segment matches, the target clamps to the first point's code at or
    /// below the table's low end and the last point's code at or above the
    /// high end; anything else is `None`.
    pub fn code_at(&self, volts: f64) -> Option<i64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let lo = a.volts.min(b.volts);
            let hi = a.volts.max(b.volts);
            if volts >= lo && volts <= hi {
                if b.volts == a.volts {
                    return Some(a.code);
                }
                let t = (volts - a.volts) / (b.volts - a.volts);
                let code = a.code as f64 + t * (b.code - a.code) as f64;
                return Some(code.round() as i64);
            }
        }
        let second = self.points.get(1).unwrap_or(first);
        if volts <= first.volts.min(second.volts) {
            return Some(first.code);
        }
        let penultimate = self
            .points
            .len()
            .checked_sub(2)
            .and_then(|i| self.points.get(i))
            .unwrap_or(last);
        if volts >= last.volts.max(penultimate.volts) {
            return Some(last.code);
        }
        None
    }
}
