//! Rail diagnostics: deterministic issue checks, prompt building, and the
//! report driver over a pluggable text backend.
//!
//! The local checks run without any backend and catch the conditions a
//! repair technician screens for first: rails outside the bench-safe
//! windows, and swings large enough to suggest ripple or a failing supply.

use crate::conversion::{VGH_SAFE_MAX_V, VGH_SAFE_MIN_V, VGL_SAFE_MAX_V, VGL_SAFE_MIN_V};
use crate::data_types::Rail;
use crate::error::ReportError;
use crate::telemetry::{LogSummary, RangeStats, VoltageLog};

/// Peak-to-peak swing beyond this flags a rail as unstable (volts).
pub const RIPPLE_FLAG_V: f64 = 1.0;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RailIssueKind {
    /// Above the safe window's high end.
    AboveSafeRange,
    /// Below the safe window's low end.
    BelowSafeRange,
    /// Peak-to-peak swing beyond [`RIPPLE_FLAG_V`].
    Unstable,
}

/// One flagged condition on one rail.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RailIssue {
    pub rail: Rail,
    pub kind: RailIssueKind,
    pub message: String,
}

/// Screen a log against the safe windows and the ripple threshold.
/// VCOM has no fixed safe window; it is only checked for stability.
pub fn flag_issues(log: &VoltageLog) -> Vec<RailIssue> {
    let summary = log.summary();
    let mut issues = Vec::new();

    if let Some(r) = &summary.vgh {
        check_window(&mut issues, Rail::Vgh, r, VGH_SAFE_MIN_V, VGH_SAFE_MAX_V);
        check_stability(&mut issues, Rail::Vgh, r);
    }
    if let Some(r) = &summary.vgl {
        check_window(&mut issues, Rail::Vgl, r, VGL_SAFE_MIN_V, VGL_SAFE_MAX_V);
        check_stability(&mut issues, Rail::Vgl, r);
    }
    if let Some(r) = &summary.vcom {
        check_stability(&mut issues, Rail::Vcom, r);
    }
    issues
}

fn check_window(issues: &mut Vec<RailIssue>, rail: Rail, range: &RangeStats, lo: f64, hi: f64) {
    if range.max > hi {
        issues.push(RailIssue {
            rail,
            kind: RailIssueKind::AboveSafeRange,
            message: format!(
                "{rail} peaks at {:.2}V, above the safe window {lo}V to {hi}V",
                range.max
            ),
        });
    }
    if range.min < lo {
        issues.push(RailIssue {
            rail,
            kind: RailIssueKind::BelowSafeRange,
            message: format!(
                "{rail} drops to {:.2}V, below the safe window {lo}V to {hi}V",
                range.min
            ),
        });
    }
}

fn check_stability(issues: &mut Vec<RailIssue>, rail: Rail, range: &RangeStats) {
    if range.spread() > RIPPLE_FLAG_V {
        issues.push(RailIssue {
            rail,
            kind: RailIssueKind::Unstable,
            message: format!(
                "{rail} swings {:.2}V peak-to-peak; check for ripple or a failing supply",
                range.spread()
            ),
        });
    }
}

/// Build the diagnostic prompt for a text backend from a data summary.
pub fn build_prompt(summary: &LogSummary) -> String {
    format!(
        "You are an expert TV repair technician and data analyst specializing in \
PMIC rail problems (VGH, VGL, VCOM). Analyze the following time-series voltage \
data from a TV panel.\n\
\n\
Produce a concise, actionable report with these sections:\n\
1. **Trend Summary:** a short overview of the stability and levels of VGH, VGL \
and VCOM.\n\
2. **Potential Issues:** voltages outside the safe repair windows (VGH: \
{VGH_SAFE_MIN_V}-{VGH_SAFE_MAX_V}V, VGL: {VGL_SAFE_MIN_V} to {VGL_SAFE_MAX_V}V) \
or signs of instability, ripple, or sudden drops/spikes.\n\
3. **Recommendations:** clear next steps for the technician, e.g. \"lower VGH \
slightly to extend COF life\" or \"VGL is not negative enough and may cause \
horizontal banding; increase its magnitude\".\n\
\n\
Use Markdown for formatting (### for headings).\n\
\n\
Here is the data summary:\n\
{}",
        summary.render()
    )
}

/// A prompt-in, prose-out text backend. The crate ships no transport; the
/// caller supplies one (or a canned stand-in under test).
pub trait TextGeneration {
    type Error;

    fn generate(&mut self, prompt: &str) -> Result<String, Self::Error>;
}

/// Finished report: local deterministic findings plus the backend's prose.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticReport {
    pub issues: Vec<RailIssue>,
    pub narrative: String,
}

/// Drives a text backend to produce a technician-facing report.
pub struct ReportBuilder<G> {
    generator: G,
}

impl<G> ReportBuilder<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Release the backend.
    pub fn free(self) -> G {
        self.generator
    }
}

impl<G> ReportBuilder<G>
where
    G: TextGeneration,
{
    /// Summarize the log, run the local checks, and invoke the backend once
    /// (no retry). An empty log is rejected before the backend is touched.
    pub fn analyze(&mut self, log: &VoltageLog) -> Result<DiagnosticReport, ReportError<G::Error>> {
        if log.is_empty() {
            return Err(ReportError::EmptyLog);
        }
        let prompt = build_prompt(&log.summary());
        let narrative = self
            .generator
            .generate(&prompt)
            .map_err(ReportError::Generator)?;
        Ok(DiagnosticReport {
            issues: flag_issues(log),
            narrative,
        })
    }
}
