//! Response normalization - turn raw model text into a structured analysis.
//!
//! The model is asked for JSON-only output but is not guaranteed to comply.
//! Normalization is a layered recovery chain, each stage attempted only when
//! the previous one fails:
//!
//! 1. strip Markdown code fences
//! 2. lenient textual repair of near-JSON
//! 3. strict `serde_json` parse
//! 4. field-by-field regex salvage
//!
//! The chain is total: any input string yields a well-formed
//! [`AnalysisResponse`]. A fifth stage, the fixed sentinel for failed model
//! invocations, lives in [`invocation_fallback_analysis`] and is applied by
//! the analyzer rather than here (invocation failure is not a parse
//! failure).

use std::sync::LazyLock;

use regex::Regex;

use crate::types::analysis::{
    AnalysisResponse, Impact, Opportunity, Risk, Severity, DEFAULT_SCORE,
};
use crate::types::tier::Tier;

/// Which stage of the recovery chain produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStage {
    /// Fence-stripped text parsed as-is
    Strict,

    /// Parsed only after textual repair
    Repaired,

    /// Strict parse failed; fields recovered by regex
    Salvaged,
}

static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)").expect("bare key regex")
});
static LOOSE_STRING_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#":\s*"([^"]*)"([^,}\]])"#).expect("string value regex")
});
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("trailing comma regex"));

static RISKS_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"risks"\s*:\s*\[(.*?)\]"#).expect("risks array regex"));
static OPPORTUNITIES_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"opportunities"\s*:\s*\[(.*?)\]"#).expect("opportunities array regex")
});
static RISK_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""risk"\s*:\s*"([^"]*)""#).expect("risk field regex"));
static OPPORTUNITY_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""opportunity"\s*:\s*"([^"]*)""#).expect("opportunity field regex")
});
static EXPLANATION_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""explanation"\s*:\s*"([^"]*)""#).expect("explanation field regex")
});
static SEVERITY_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""severity"\s*:\s*"([^"]*)""#).expect("severity field regex"));
static IMPACT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""impact"\s*:\s*"([^"]*)""#).expect("impact field regex"));
static SUMMARY_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""summary"\s*:\s*"([^"]*)""#).expect("summary field regex"));
static SCORE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""overallScore"\s*:\s*"?(\d+)"#).expect("score field regex")
});

/// Normalize raw model output into a structured analysis. Total: never
/// panics, never errors, for any input string.
pub fn normalize_analysis(raw: &str, tier: Tier) -> AnalysisResponse {
    let (analysis, stage) = normalize_analysis_with_stage(raw, tier);
    match stage {
        RecoveryStage::Strict => {}
        RecoveryStage::Repaired => {
            tracing::debug!("analysis response required textual repair before parsing");
        }
        RecoveryStage::Salvaged => {
            tracing::warn!(
                risks = analysis.risks.len(),
                opportunities = analysis.opportunities.len(),
                "analysis response was not valid JSON; fields recovered by regex salvage"
            );
        }
    }
    analysis
}

/// As [`normalize_analysis`], also reporting which recovery stage succeeded.
pub fn normalize_analysis_with_stage(raw: &str, tier: Tier) -> (AnalysisResponse, RecoveryStage) {
    let stripped = strip_code_fences(raw);

    if let Ok(analysis) = serde_json::from_str::<AnalysisResponse>(&stripped) {
        return (analysis, RecoveryStage::Strict);
    }

    let repaired = repair_json(&stripped);
    if let Ok(analysis) = serde_json::from_str::<AnalysisResponse>(&repaired) {
        return (analysis, RecoveryStage::Repaired);
    }

    (salvage_analysis(&repaired, tier), RecoveryStage::Salvaged)
}

/// Remove Markdown code fencing (```json ... ``` or ``` ... ```) and
/// surrounding whitespace, tolerating narration before or after the block.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(start) = trimmed.find("```json") {
        let after = start + "```json".len();
        return match trimmed[after..].find("```") {
            Some(end) => trimmed[after..after + end].trim().to_string(),
            // Opening fence never closed
            None => trimmed[after..].trim().to_string(),
        };
    }

    if let Some(start) = trimmed.find("```") {
        let after = start + 3;
        // Skip a language identifier on the fence line, if present
        let content_start = trimmed[after..]
            .find('\n')
            .map(|i| after + i + 1)
            .unwrap_or(after);
        return match trimmed[content_start..].find("```") {
            Some(end) => trimmed[content_start..content_start + end].trim().to_string(),
            None => trimmed[content_start..].trim().to_string(),
        };
    }

    trimmed.to_string()
}

/// Best-effort textual rewrites coercing near-JSON into valid JSON.
///
/// Three idempotent passes: quote bare object keys, normalize whitespace
/// after quoted string values, and drop trailing commas before a closing
/// brace. Unreliable by construction - it will not fix unescaped inner
/// quotes or missing commas between array elements - which is why regex
/// salvage still backstops it.
pub fn repair_json(text: &str) -> String {
    let quoted_keys = BARE_KEY.replace_all(text, "$1\"$2\"$3");
    let values = LOOSE_STRING_VALUE.replace_all(&quoted_keys, ": \"$1\"$2");
    TRAILING_COMMA.replace_all(&values, "}").into_owned()
}

/// Recover whatever fields regex can find in text that failed strict
/// parsing. Unrecoverable fields keep the defaults from
/// [`AnalysisResponse::default`].
pub fn salvage_analysis(text: &str, tier: Tier) -> AnalysisResponse {
    let mut analysis = AnalysisResponse::default();
    let extended = tier.config().include_extended_fields;

    if let Some(caps) = RISKS_ARRAY.captures(text) {
        analysis.risks = caps[1]
            .split("},")
            .filter_map(|fragment| salvage_risk(fragment, extended))
            .collect();
    }

    if let Some(caps) = OPPORTUNITIES_ARRAY.captures(text) {
        analysis.opportunities = caps[1]
            .split("},")
            .filter_map(|fragment| salvage_opportunity(fragment, extended))
            .collect();
    }

    if let Some(caps) = SUMMARY_FIELD.captures(text) {
        analysis.summary = caps[1].to_string();
    }

    if let Some(caps) = SCORE_FIELD.captures(text) {
        analysis.overall_score = caps[1].parse::<u64>().map_or(DEFAULT_SCORE, |n| {
            n.min(100) as u8
        });
    }

    analysis
}

fn salvage_risk(fragment: &str, extended: bool) -> Option<Risk> {
    let description = RISK_FIELD.captures(fragment).map(|c| c[1].to_string());
    let explanation = EXPLANATION_FIELD.captures(fragment).map(|c| c[1].to_string());
    // Fragments matching neither field are split debris, not items
    if description.is_none() && explanation.is_none() {
        return None;
    }

    let severity = if extended {
        SEVERITY_FIELD
            .captures(fragment)
            .map(|c| Severity::parse_lenient(&c[1]))
            .unwrap_or_default()
    } else {
        Severity::default()
    };

    Some(Risk {
        description: description.unwrap_or_else(|| "Unknown".to_string()),
        explanation: explanation.unwrap_or_else(|| "Unknown".to_string()),
        severity,
    })
}

fn salvage_opportunity(fragment: &str, extended: bool) -> Option<Opportunity> {
    let description = OPPORTUNITY_FIELD.captures(fragment).map(|c| c[1].to_string());
    let explanation = EXPLANATION_FIELD.captures(fragment).map(|c| c[1].to_string());
    if description.is_none() && explanation.is_none() {
        return None;
    }

    let impact = if extended {
        IMPACT_FIELD
            .captures(fragment)
            .map(|c| Impact::parse_lenient(&c[1]))
            .unwrap_or_default()
    } else {
        Impact::default()
    };

    Some(Opportunity {
        description: description.unwrap_or_else(|| "Unknown".to_string()),
        explanation: explanation.unwrap_or_else(|| "Unknown".to_string()),
        impact,
    })
}

/// The fixed sentinel analysis returned when the model call itself failed.
///
/// Callers should treat the sentinel summary plus a score of 50 as a
/// soft-failure signal rather than a crash.
pub fn invocation_fallback_analysis() -> AnalysisResponse {
    AnalysisResponse {
        risks: vec![Risk {
            description: "Error analyzing contract".to_string(),
            explanation: "The analysis service encountered an error".to_string(),
            severity: Severity::High,
        }],
        opportunities: vec![Opportunity {
            description: "Try again later".to_string(),
            explanation: "The service may be temporarily unavailable".to_string(),
            impact: Impact::Medium,
        }],
        summary: "Error analyzing contract. Please try again later.".to_string(),
        overall_score: DEFAULT_SCORE,
        ..Default::default()
    }
}
