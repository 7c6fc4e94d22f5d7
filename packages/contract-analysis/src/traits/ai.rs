//! AI trait for model invocation.

use async_trait::async_trait;

use crate::error::Result;

/// Single-shot access to a generative-text model.
///
/// Implementations wrap specific LLM providers (Gemini, OpenAI, etc.) and
/// own client lifetime and credentials. The contract is deliberately thin:
/// one request per call, no internal retry, no timeout. Transport failures
/// must surface as [`crate::AnalysisError::Invocation`] so the analyzer can
/// distinguish "the model call failed" from "the model answered badly" —
/// the two are handled very differently downstream.
#[async_trait]
pub trait AI: Send + Sync {
    /// Send a prompt and return the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Identifier of the underlying model, stamped onto persisted analyses.
    fn model_id(&self) -> &str;
}
