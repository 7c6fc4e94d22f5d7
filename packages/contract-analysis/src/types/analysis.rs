//! The structured analysis produced by the normalizer.
//!
//! Field names and JSON shape mirror what the model is asked to emit, so a
//! well-behaved response deserializes directly. Every field is defaulted:
//! the normalizer must stay total even when the model omits half the shape.

use serde::{Deserialize, Deserializer, Serialize};

/// Score used when the model omits or mangles `overallScore`.
pub const DEFAULT_SCORE: u8 = 50;

/// Summary used when none can be recovered from the response.
pub const DEFAULT_SUMMARY: &str = "Error analyzing contract";

/// Severity of an identified risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    /// Parse leniently; anything unrecognized becomes `Medium`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim() {
            v if v.eq_ignore_ascii_case("low") => Severity::Low,
            v if v.eq_ignore_ascii_case("high") => Severity::High,
            _ => Severity::Medium,
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Severity::parse_lenient).unwrap_or_default())
    }
}

/// Impact of an identified opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    #[default]
    Medium,
    High,
}

impl Impact {
    /// Parse leniently; anything unrecognized becomes `Medium`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim() {
            v if v.eq_ignore_ascii_case("low") => Impact::Low,
            v if v.eq_ignore_ascii_case("high") => Impact::High,
            _ => Impact::Medium,
        }
    }
}

impl<'de> Deserialize<'de> for Impact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Impact::parse_lenient).unwrap_or_default())
    }
}

/// A potential risk for the party receiving the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    /// What the risk is (JSON key `risk`, matching the prompted shape)
    #[serde(rename = "risk")]
    pub description: String,

    #[serde(default)]
    pub explanation: String,

    #[serde(default)]
    pub severity: Severity,
}

/// A potential opportunity or benefit for the receiving party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// What the opportunity is (JSON key `opportunity`)
    #[serde(rename = "opportunity")]
    pub description: String,

    #[serde(default)]
    pub explanation: String,

    #[serde(default)]
    pub impact: Impact,
}

/// Financial terms breakdown (premium analyses).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialTerms {
    pub description: String,
    pub details: Vec<String>,
}

/// Compensation structure breakdown (premium analyses).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompensationStructure {
    pub base_salary: Option<String>,
    pub bonuses: Option<String>,
    pub equity: Option<String>,
    pub other_benefits: Option<String>,
}

/// Clause text the model may emit as a string or a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseText {
    One(String),
    Many(Vec<String>),
}

/// A normalized contract analysis, before persistence fields are attached.
///
/// Free-tier responses populate only risks, opportunities, summary and
/// score; the extended fields stay at their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResponse {
    pub risks: Vec<Risk>,
    pub opportunities: Vec<Opportunity>,
    pub summary: String,

    /// Overall favorability, clamped to 0-100.
    #[serde(deserialize_with = "deserialize_score")]
    pub overall_score: u8,

    pub recommendations: Vec<String>,
    pub key_clauses: Vec<String>,
    pub legal_compliance: Option<String>,
    pub negotiation_points: Vec<String>,
    pub contract_duration: Option<String>,
    pub termination_conditions: Option<String>,
    pub financial_terms: Option<FinancialTerms>,
    pub compensation_structure: Option<CompensationStructure>,
    pub performance_metrics: Vec<String>,

    /// Clauses specific to the contract type. The prompt asks for
    /// `specificClauses`; the persisted shape calls the same data
    /// `intellectualPropertyClauses`, so both spellings are accepted.
    #[serde(rename = "intellectualPropertyClauses", alias = "specificClauses")]
    pub intellectual_property_clauses: Option<ClauseText>,
}

impl Default for AnalysisResponse {
    fn default() -> Self {
        Self {
            risks: Vec::new(),
            opportunities: Vec::new(),
            summary: DEFAULT_SUMMARY.to_string(),
            overall_score: DEFAULT_SCORE,
            recommendations: Vec::new(),
            key_clauses: Vec::new(),
            legal_compliance: None,
            negotiation_points: Vec::new(),
            contract_duration: None,
            termination_conditions: None,
            financial_terms: None,
            compensation_structure: None,
            performance_metrics: Vec::new(),
            intellectual_property_clauses: None,
        }
    }
}

/// Clamp a raw score into the 0-100 range.
pub(crate) fn clamp_score(raw: f64) -> u8 {
    if raw.is_finite() {
        raw.round().clamp(0.0, 100.0) as u8
    } else {
        DEFAULT_SCORE
    }
}

/// The model emits `overallScore` as a number or a numeric string
/// (the prompt template literally shows a string). Accept both, clamp
/// into range, and fall back to [`DEFAULT_SCORE`] for anything else.
fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().map(clamp_score).unwrap_or(DEFAULT_SCORE),
        serde_json::Value::String(s) => {
            s.trim().parse::<f64>().map(clamp_score).unwrap_or(DEFAULT_SCORE)
        }
        _ => DEFAULT_SCORE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_leniently() {
        assert_eq!(Severity::parse_lenient("HIGH"), Severity::High);
        assert_eq!(Severity::parse_lenient(" low "), Severity::Low);
        assert_eq!(Severity::parse_lenient("catastrophic"), Severity::Medium);
    }

    #[test]
    fn risk_deserializes_with_defaults() {
        let risk: Risk = serde_json::from_str(r#"{"risk": "Late fee"}"#).unwrap();
        assert_eq!(risk.description, "Late fee");
        assert_eq!(risk.explanation, "");
        assert_eq!(risk.severity, Severity::Medium);
    }

    #[test]
    fn severity_null_defaults_to_medium() {
        let risk: Risk =
            serde_json::from_str(r#"{"risk": "x", "severity": null}"#).unwrap();
        assert_eq!(risk.severity, Severity::Medium);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let analysis: AnalysisResponse = serde_json::from_str("{}").unwrap();
        assert!(analysis.risks.is_empty());
        assert_eq!(analysis.summary, DEFAULT_SUMMARY);
        assert_eq!(analysis.overall_score, DEFAULT_SCORE);
    }

    #[test]
    fn score_accepts_number_and_string() {
        let a: AnalysisResponse =
            serde_json::from_str(r#"{"overallScore": 85}"#).unwrap();
        assert_eq!(a.overall_score, 85);

        let b: AnalysisResponse =
            serde_json::from_str(r#"{"overallScore": "72"}"#).unwrap();
        assert_eq!(b.overall_score, 72);
    }

    #[test]
    fn score_clamps_and_defaults() {
        let high: AnalysisResponse =
            serde_json::from_str(r#"{"overallScore": 250}"#).unwrap();
        assert_eq!(high.overall_score, 100);

        let negative: AnalysisResponse =
            serde_json::from_str(r#"{"overallScore": -3}"#).unwrap();
        assert_eq!(negative.overall_score, 0);

        let garbage: AnalysisResponse =
            serde_json::from_str(r#"{"overallScore": "excellent"}"#).unwrap();
        assert_eq!(garbage.overall_score, DEFAULT_SCORE);
    }

    #[test]
    fn clause_text_accepts_string_or_list() {
        let one: ClauseText = serde_json::from_str(r#""IP stays with employer""#).unwrap();
        assert_eq!(one, ClauseText::One("IP stays with employer".to_string()));

        let many: ClauseText = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many, ClauseText::Many(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn specific_clauses_alias_accepted() {
        let a: AnalysisResponse =
            serde_json::from_str(r#"{"specificClauses": "non-compete applies"}"#).unwrap();
        assert_eq!(
            a.intellectual_property_clauses,
            Some(ClauseText::One("non-compete applies".to_string()))
        );
    }

    #[test]
    fn camel_case_round_trip() {
        let analysis = AnalysisResponse {
            risks: vec![Risk {
                description: "Unlimited liability".to_string(),
                explanation: "No cap on damages".to_string(),
                severity: Severity::High,
            }],
            overall_score: 30,
            key_clauses: vec!["Indemnification".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["risks"][0]["risk"], "Unlimited liability");
        assert_eq!(json["risks"][0]["severity"], "high");
        assert_eq!(json["overallScore"], 30);
        assert_eq!(json["keyClauses"][0], "Indemnification");

        let back: AnalysisResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, analysis);
    }
}
