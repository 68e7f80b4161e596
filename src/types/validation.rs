//! Claim validation types and scoring constants.

use serde::{Deserialize, Serialize};

/// Weight of the cross-reference confidence in the final score.
///
/// The 70/30 split between cross-reference and temporal signals is a fixed
/// design constant, not configurable.
pub const CROSS_REFERENCE_WEIGHT: f64 = 0.7;

/// Weight of the temporal consistency score in the final score.
pub const TEMPORAL_WEIGHT: f64 = 0.3;

/// A claim is valid when its confidence reaches this threshold.
pub const VALIDITY_THRESHOLD: f64 = 0.6;

/// Claims above this confidence are reported as high-confidence findings.
///
/// Note the deliberate gap against [`VALIDITY_THRESHOLD`]: a claim scoring
/// in [0.6, 0.7] is valid but appears in neither report list.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Verdict for one claim after a full validation pass. Immutable once
/// created; one per claim per pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Derived: `confidence_score >= VALIDITY_THRESHOLD`.
    pub is_valid: bool,

    /// Combined confidence in [0, 1].
    pub confidence_score: f64,

    /// Contradictory evidence plus temporal consistency issues, and any
    /// error text from short-circuited validation steps.
    pub issues: Vec<String>,

    /// Evidence supporting the claim.
    pub supporting_sources: Vec<String>,

    /// Evidence contradicting the claim.
    pub contradictory_sources: Vec<String>,
}

impl ValidationResult {
    /// Build a result from a final confidence score, deriving validity.
    pub fn scored(
        confidence_score: f64,
        issues: Vec<String>,
        supporting_sources: Vec<String>,
        contradictory_sources: Vec<String>,
    ) -> Self {
        let confidence_score = confidence_score.clamp(0.0, 1.0);
        Self {
            is_valid: confidence_score >= VALIDITY_THRESHOLD,
            confidence_score,
            issues,
            supporting_sources,
            contradictory_sources,
        }
    }

    /// Terminal low-confidence result for a validation step that failed
    /// partway through (no retries between steps).
    pub fn short_circuited(confidence_score: f64, error: impl Into<String>) -> Self {
        Self::scored(confidence_score, vec![error.into()], Vec::new(), Vec::new())
    }

    /// Zero-confidence result for a claim whose validation failed entirely.
    /// Sibling claims are unaffected.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::scored(0.0, vec![error.into()], Vec::new(), Vec::new())
    }
}

/// Structured judgment from the cross-reference analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossReference {
    /// Evidence supporting the claim.
    #[serde(default)]
    pub supporting_evidence: Vec<String>,

    /// Evidence contradicting the claim.
    #[serde(default)]
    pub contradictory_evidence: Vec<String>,

    /// How well the evidence supports the claim, in [0, 1].
    pub confidence: f64,

    /// Qualitative source reliability assessment.
    #[serde(default)]
    pub reliability: String,

    /// Qualitative consistency assessment across sources.
    #[serde(default)]
    pub consistency: String,

    /// Qualitative recency assessment of the evidence.
    #[serde(default)]
    pub recency: String,

    /// Qualitative authority assessment of the sources.
    #[serde(default)]
    pub authority: String,
}

impl CrossReference {
    /// Neutral fallback substituted when the analysis response does not
    /// parse. Must never raise.
    pub fn neutral() -> Self {
        Self {
            supporting_evidence: Vec::new(),
            contradictory_evidence: Vec::new(),
            confidence: 0.5,
            reliability: "unable to parse".to_string(),
            consistency: "unable to parse".to_string(),
            recency: "unable to parse".to_string(),
            authority: "unable to parse".to_string(),
        }
    }

    /// Clamp the model-reported confidence into [0, 1].
    pub fn clamped(mut self) -> Self {
        self.confidence = self.confidence.clamp(0.0, 1.0);
        self
    }
}

/// Direction of change detected by the temporal consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    Volatile,
    #[serde(other)]
    Unknown,
}

/// Structured judgment from the temporal consistency call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalConsistency {
    /// Agreement of evidence across time windows, in [0, 1].
    pub consistency_score: f64,

    /// Detected trend direction.
    #[serde(default = "TemporalConsistency::unknown_trend")]
    pub trend: TrendDirection,

    /// Changes observed in the recent window.
    #[serde(default)]
    pub recent_changes: Vec<String>,

    /// Inconsistencies observed across windows.
    #[serde(default)]
    pub consistency_issues: Vec<String>,
}

impl TemporalConsistency {
    fn unknown_trend() -> TrendDirection {
        TrendDirection::Unknown
    }

    /// Neutral fallback substituted when the analysis response does not
    /// parse. Must never raise.
    pub fn neutral() -> Self {
        Self {
            consistency_score: 0.5,
            trend: TrendDirection::Unknown,
            recent_changes: Vec::new(),
            consistency_issues: Vec::new(),
        }
    }

    /// Clamp the model-reported score into [0, 1].
    pub fn clamped(mut self) -> Self {
        self.consistency_score = self.consistency_score.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_derived_from_threshold() {
        let at_threshold = ValidationResult::scored(0.6, vec![], vec![], vec![]);
        assert!(at_threshold.is_valid);

        let below = ValidationResult::scored(0.59, vec![], vec![], vec![]);
        assert!(!below.is_valid);
    }

    #[test]
    fn test_confidence_clamped() {
        let result = ValidationResult::scored(1.4, vec![], vec![], vec![]);
        assert_eq!(result.confidence_score, 1.0);

        let result = ValidationResult::scored(-0.2, vec![], vec![], vec![]);
        assert_eq!(result.confidence_score, 0.0);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_failed_carries_error_text() {
        let result = ValidationResult::failed("cross-check query generation failed");
        assert!(!result.is_valid);
        assert_eq!(result.confidence_score, 0.0);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn test_trend_direction_parses_known_and_unknown() {
        let known: TrendDirection = serde_json::from_str("\"improving\"").unwrap();
        assert_eq!(known, TrendDirection::Improving);

        let unknown: TrendDirection = serde_json::from_str("\"sideways\"").unwrap();
        assert_eq!(unknown, TrendDirection::Unknown);
    }

    #[test]
    fn test_temporal_defaults_for_missing_fields() {
        let parsed: TemporalConsistency =
            serde_json::from_str(r#"{"consistency_score": 0.8}"#).unwrap();
        assert_eq!(parsed.trend, TrendDirection::Unknown);
        assert!(parsed.recent_changes.is_empty());
    }

    #[test]
    fn test_neutral_fallbacks() {
        let cross = CrossReference::neutral();
        assert_eq!(cross.confidence, 0.5);
        assert!(cross.supporting_evidence.is_empty());
        assert!(cross.contradictory_evidence.is_empty());

        let temporal = TemporalConsistency::neutral();
        assert_eq!(temporal.consistency_score, 0.5);
        assert_eq!(temporal.trend, TrendDirection::Unknown);
    }
}
