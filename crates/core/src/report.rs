//! Coaching report schema and model-reply normalization.
//!
//! The model's reply is free text that is expected to contain a JSON
//! object, optionally fenced inside a markdown code block. Extraction picks
//! a single candidate (a ```json-labeled fence, else the first fence, else
//! the raw text) and deserializes it into [`AnalysisReport`]. Anything that
//! fails the typed parse yields the deterministic fallback report instead
//! of an error, so callers always receive a fully shaped report.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sport label used in the fallback report.
pub const FALLBACK_SPORT: &str = "Unknown";

/// Confidence reported when the reply could not be parsed.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Fallback entry for the technique analysis section.
pub const FALLBACK_TECHNIQUE: &str = "Analysis could not be parsed correctly";

/// Fallback entry for the improvement suggestions section.
pub const FALLBACK_SUGGESTION: &str = "Please try again";

/// Fallback entry for the positive highlights section.
pub const FALLBACK_HIGHLIGHT: &str = "Unable to analyze";

/// Fallback entry for the areas of concern section.
pub const FALLBACK_CONCERN: &str = "Analysis parsing failed";

/// Matches a fenced code block explicitly labeled as JSON.
const JSON_FENCE_PATTERN: &str = r"(?s)```json\s*(.*?)\s*```";

/// Matches any fenced code block.
const ANY_FENCE_PATTERN: &str = r"(?s)```\s*(.*?)\s*```";

/// Compiled fence regexes. Compiled once, reused forever.
static JSON_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(JSON_FENCE_PATTERN).expect("valid regex"));
static ANY_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ANY_FENCE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// AnalysisReport
// ---------------------------------------------------------------------------

/// Structured coaching report produced from one analysis request.
///
/// All four list sections are always present; the fallback path fills each
/// with a single placeholder entry rather than omitting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Free-text label for the sport identified in the video.
    pub sport: String,
    /// Model confidence in the sport identification, in `[0, 1]`.
    pub confidence: f64,
    /// Point-by-point technique and form observations.
    pub technique_analysis: Vec<String>,
    /// Actionable suggestions for improving technique or approach.
    pub improvement_suggestions: Vec<String>,
    /// Notable strengths in the performance.
    pub positive_highlights: Vec<String>,
    /// Risky movements or issues that need attention.
    pub areas_of_concern: Vec<String>,
}

impl AnalysisReport {
    /// The deterministic report substituted when the reply cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            sport: FALLBACK_SPORT.to_string(),
            confidence: FALLBACK_CONFIDENCE,
            technique_analysis: vec![FALLBACK_TECHNIQUE.to_string()],
            improvement_suggestions: vec![FALLBACK_SUGGESTION.to_string()],
            positive_highlights: vec![FALLBACK_HIGHLIGHT.to_string()],
            areas_of_concern: vec![FALLBACK_CONCERN.to_string()],
        }
    }

    /// Clamp `confidence` into `[0, 1]`; the model is not trusted to stay
    /// within the documented range.
    fn clamped(mut self) -> Self {
        self.confidence = self.confidence.clamp(0.0, 1.0);
        self
    }
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

/// Outcome of parsing a model reply at the normalization boundary.
///
/// Both branches carry a fully shaped report; `Fallback` marks that the
/// reply did not contain a parseable report and the placeholder was
/// substituted. No parse error escapes past this boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The reply contained a valid report.
    Parsed(AnalysisReport),
    /// The reply was unusable; this is the deterministic placeholder.
    Fallback(AnalysisReport),
}

impl ReportOutcome {
    /// Unwrap to the report, whichever branch was taken.
    pub fn into_report(self) -> AnalysisReport {
        match self {
            ReportOutcome::Parsed(report) | ReportOutcome::Fallback(report) => report,
        }
    }

    /// Whether the fallback placeholder was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ReportOutcome::Fallback(_))
    }
}

/// Parse a model reply into a report, falling back on any parse failure.
///
/// A single JSON candidate is extracted (```json fence, else any fence,
/// else the raw reply) and deserialized into the full [`AnalysisReport`]
/// schema. Well-formed JSON missing required fields counts as a parse
/// failure and takes the fallback path.
pub fn parse_reply(reply: &str) -> ReportOutcome {
    let candidate = json_candidate(reply);
    match serde_json::from_str::<AnalysisReport>(candidate.trim()) {
        Ok(report) => ReportOutcome::Parsed(report.clamped()),
        Err(_) => ReportOutcome::Fallback(AnalysisReport::fallback()),
    }
}

/// Extract the single JSON candidate from a reply.
fn json_candidate(reply: &str) -> &str {
    if let Some(caps) = JSON_FENCE_RE.captures(reply) {
        return caps.get(1).map_or(reply, |m| m.as_str());
    }
    if let Some(caps) = ANY_FENCE_RE.captures(reply) {
        return caps.get(1).map_or(reply, |m| m.as_str());
    }
    reply
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
