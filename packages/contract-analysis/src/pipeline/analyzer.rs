//! Analyzer - orchestrates extraction, type detection, and analysis.

use uuid::Uuid;

use crate::error::Result;
use crate::pipeline::normalize::{
    invocation_fallback_analysis, normalize_analysis_with_stage, RecoveryStage,
};
use crate::pipeline::prompts::{
    format_analysis_prompt, format_type_detection_prompt, TYPE_DETECTION_EXCERPT_CHARS,
};
use crate::traits::{TextExtractor, AI};
use crate::types::analysis::AnalysisResponse;
use crate::types::record::ContractAnalysis;
use crate::types::tier::Tier;

/// Sentinel type returned when classification fails.
pub const UNKNOWN_CONTRACT_TYPE: &str = "Unknown Contract";

/// Analyzer configuration.
///
/// Explicit state passed at construction; the model client itself lives in
/// the [`AI`] implementation and is owned by the composition root.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Language stamped onto produced records
    pub language: String,

    /// Contract text budget for the type-detection prompt
    pub type_detection_excerpt_chars: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            type_detection_excerpt_chars: TYPE_DETECTION_EXCERPT_CHARS,
        }
    }
}

/// The contract analysis pipeline: extract -> classify -> prompt -> invoke
/// -> normalize.
///
/// Each request runs as one sequential chain with no shared mutable state,
/// so independent requests can run concurrently on the same analyzer. No
/// deadline is imposed here; callers wanting a timeout should wrap the
/// call and treat expiry like any other invocation failure.
pub struct Analyzer<E, A> {
    extractor: E,
    ai: A,
    config: AnalyzerConfig,
}

impl<E: TextExtractor, A: AI> Analyzer<E, A> {
    /// Create an analyzer with default configuration.
    pub fn new(extractor: E, ai: A) -> Self {
        Self {
            extractor,
            ai,
            config: AnalyzerConfig::default(),
        }
    }

    /// Override the configuration.
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Detect the contract type from already-extracted text.
    ///
    /// Total: classification failure must never abort the overall flow, so
    /// any invocation error yields [`UNKNOWN_CONTRACT_TYPE`] instead of
    /// propagating.
    pub async fn detect_contract_type(&self, contract_text: &str) -> String {
        let prompt =
            format_type_detection_prompt(contract_text, self.config.type_detection_excerpt_chars);

        tracing::debug!(
            text_chars = contract_text.chars().count(),
            "requesting contract type detection"
        );

        match self.ai.generate(&prompt).await {
            Ok(response) => {
                let contract_type = response.trim().to_string();
                tracing::debug!(%contract_type, "contract type detected");
                contract_type
            }
            Err(error) => {
                tracing::warn!(%error, "contract type detection failed");
                UNKNOWN_CONTRACT_TYPE.to_string()
            }
        }
    }

    /// Analyze already-extracted contract text.
    ///
    /// Total: always returns a well-formed analysis. Invocation failures
    /// become the fixed sentinel analysis; malformed model output is
    /// absorbed by the normalization chain.
    pub async fn analyze_text(
        &self,
        contract_text: &str,
        tier: Tier,
        contract_type: &str,
    ) -> AnalysisResponse {
        let prompt = format_analysis_prompt(contract_type, tier, contract_text);

        tracing::debug!(
            %tier,
            contract_type,
            prompt_len = prompt.len(),
            "requesting contract analysis"
        );

        let raw = match self.ai.generate(&prompt).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::error!(%error, %tier, "model invocation failed; returning sentinel analysis");
                return invocation_fallback_analysis();
            }
        };

        tracing::debug!(response_len = raw.len(), "analysis response received");

        let (analysis, stage) = normalize_analysis_with_stage(&raw, tier);
        if stage == RecoveryStage::Salvaged {
            tracing::warn!(
                risks = analysis.risks.len(),
                opportunities = analysis.opportunities.len(),
                "analysis response salvaged by regex recovery"
            );
        }
        analysis
    }

    /// Extract text from an uploaded document and detect its contract type.
    ///
    /// Extraction errors propagate; detection failures do not.
    pub async fn detect_upload_type(&self, bytes: &[u8]) -> Result<String> {
        let text = self.extractor.extract_text(bytes).await?;
        Ok(self.detect_contract_type(&text).await)
    }

    /// Run the full pipeline over an uploaded document and assemble the
    /// record for the caller to persist.
    ///
    /// When `contract_type` is not supplied, it is detected first. Only
    /// extraction failures surface as errors; everything downstream
    /// degrades to sentinel values instead.
    pub async fn analyze_upload(
        &self,
        bytes: &[u8],
        owner_id: Uuid,
        tier: Tier,
        contract_type: Option<&str>,
    ) -> Result<ContractAnalysis> {
        let text = self.extractor.extract_text(bytes).await?;
        tracing::debug!(text_len = text.len(), "document text extracted");

        let contract_type = match contract_type {
            Some(provided) => provided.to_string(),
            None => self.detect_contract_type(&text).await,
        };

        let analysis = self.analyze_text(&text, tier, &contract_type).await;

        tracing::info!(
            %owner_id,
            %tier,
            %contract_type,
            score = analysis.overall_score,
            risks = analysis.risks.len(),
            opportunities = analysis.opportunities.len(),
            "contract analysis complete"
        );

        Ok(ContractAnalysis::from_response(
            owner_id,
            text,
            contract_type,
            analysis,
            &self.config.language,
            self.ai.model_id(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAI, MockExtractor};

    #[tokio::test]
    async fn detection_failure_yields_unknown_contract() {
        let analyzer = Analyzer::new(
            MockExtractor::returning("text"),
            MockAI::new().with_failure("network down"),
        );

        let detected = analyzer.detect_contract_type("some contract").await;
        assert_eq!(detected, UNKNOWN_CONTRACT_TYPE);
    }

    #[tokio::test]
    async fn detection_trims_response() {
        let analyzer = Analyzer::new(
            MockExtractor::returning("text"),
            MockAI::new().with_response("  Employment \n"),
        );

        let detected = analyzer.detect_contract_type("some contract").await;
        assert_eq!(detected, "Employment");
    }

    #[tokio::test]
    async fn invocation_failure_yields_sentinel_analysis() {
        let analyzer = Analyzer::new(
            MockExtractor::returning("text"),
            MockAI::new().with_failure("quota exceeded"),
        );

        let analysis = analyzer.analyze_text("contract", Tier::Premium, "Sales").await;
        assert_eq!(
            analysis.summary,
            "Error analyzing contract. Please try again later."
        );
        assert_eq!(analysis.overall_score, 50);
        assert_eq!(analysis.risks.len(), 1);
    }

    #[tokio::test]
    async fn detection_prompt_respects_configured_excerpt() {
        let ai = MockAI::new().with_response("Lease");
        let analyzer = Analyzer::new(MockExtractor::returning("text"), ai).with_config(
            AnalyzerConfig {
                type_detection_excerpt_chars: 10,
                ..Default::default()
            },
        );

        let long_text = "y".repeat(100);
        analyzer.detect_contract_type(&long_text).await;

        let calls = analyzer.ai.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains(&"y".repeat(10)));
        assert!(!calls[0].contains(&"y".repeat(11)));
    }
}
