// AI implementation using Google Gemini via rig.
//
// This is the infrastructure implementation of the AI trait. Business
// logic (what to prompt for) lives in the pipeline layer.

use async_trait::async_trait;
use rig::completion::Prompt;
use rig::providers::gemini;

use crate::error::{AnalysisError, Result};
use crate::traits::AI;

/// Default Gemini model for contract analysis.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Gemini implementation of the [`AI`] trait.
#[derive(Clone)]
pub struct GeminiAI {
    client: gemini::Client,
    model: String,
}

impl GeminiAI {
    /// Create a client using [`DEFAULT_GEMINI_MODEL`].
    pub fn new(api_key: &str) -> Self {
        Self::with_model(api_key, DEFAULT_GEMINI_MODEL)
    }

    /// Create a client for a specific Gemini model.
    pub fn with_model(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: gemini::Client::new(api_key),
            model: model.into(),
        }
    }
}

#[async_trait]
impl AI for GeminiAI {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            prompt_length = prompt.len(),
            model = %self.model,
            "calling Gemini API"
        );

        let agent = self.client.agent(&self.model).build();

        let response = agent.prompt(prompt).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                "Gemini API call failed"
            );
            AnalysisError::Invocation(Box::new(e))
        })?;

        tracing::debug!(
            response_length = response.len(),
            model = %self.model,
            "Gemini API response received"
        );

        Ok(response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
