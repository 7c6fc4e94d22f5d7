//! The persisted contract analysis record.
//!
//! The library does no database I/O itself; it hands the caller a fully
//! assembled record to store under whatever persistence layer it owns.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::AnalysisResponse;

/// A contract analysis as persisted by the caller.
///
/// Created once per analysis request and immutable thereafter, except for
/// optional user feedback. Serializes with the camelCase field names the
/// web layer exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAnalysis {
    /// Owning user
    pub owner_id: Uuid,

    /// Full extracted contract text the analysis was produced from
    pub contract_text: String,

    /// Classification label, e.g. "Employment" or "Unknown Contract"
    pub contract_type: String,

    #[serde(flatten)]
    pub analysis: AnalysisResponse,

    pub created_at: DateTime<Utc>,
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_feedback: Option<UserFeedback>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom_fields: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Output language of the analysis
    pub language: String,

    /// Which model produced the analysis
    pub ai_model: String,
}

impl ContractAnalysis {
    /// Assemble a record from a normalized analysis.
    pub fn from_response(
        owner_id: Uuid,
        contract_text: impl Into<String>,
        contract_type: impl Into<String>,
        analysis: AnalysisResponse,
        language: impl Into<String>,
        ai_model: impl Into<String>,
    ) -> Self {
        Self {
            owner_id,
            contract_text: contract_text.into(),
            contract_type: contract_type.into(),
            analysis,
            created_at: Utc::now(),
            version: 1,
            user_feedback: None,
            custom_fields: IndexMap::new(),
            expiration_date: None,
            language: language.into(),
            ai_model: ai_model.into(),
        }
    }

    /// Attach user feedback. The only mutation a stored analysis supports.
    pub fn set_feedback(&mut self, feedback: UserFeedback) {
        self.user_feedback = Some(feedback);
    }
}

/// Optional user feedback on a stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedback {
    /// 1-5 star rating
    pub rating: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl UserFeedback {
    /// Create feedback, clamping the rating into the 1-5 range.
    pub fn new(rating: u8, comments: Option<String>) -> Self {
        Self {
            rating: rating.clamp(1, 5),
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_camel_case() {
        let record = ContractAnalysis::from_response(
            Uuid::nil(),
            "full text",
            "Lease",
            AnalysisResponse::default(),
            "en",
            "gemini-1.5-pro",
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ownerId"], Uuid::nil().to_string());
        assert_eq!(json["contractType"], "Lease");
        assert_eq!(json["aiModel"], "gemini-1.5-pro");
        assert_eq!(json["version"], 1);
        assert_eq!(json["overallScore"], 50);
        // Optional fields are omitted until set
        assert!(json.get("userFeedback").is_none());
        assert!(json.get("expirationDate").is_none());
    }

    #[test]
    fn feedback_rating_is_clamped() {
        assert_eq!(UserFeedback::new(9, None).rating, 5);
        assert_eq!(UserFeedback::new(0, None).rating, 1);
    }

    #[test]
    fn record_round_trips() {
        let mut record = ContractAnalysis::from_response(
            Uuid::new_v4(),
            "text",
            "Employment",
            AnalysisResponse::default(),
            "en",
            "mock-model",
        );
        record.set_feedback(UserFeedback::new(4, Some("helpful".to_string())));

        let json = serde_json::to_string(&record).unwrap();
        let back: ContractAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
