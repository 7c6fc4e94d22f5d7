//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the analysis library
//! without making real AI or PDF-extraction calls.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{AnalysisError, ExtractionError, ExtractionResult, Result};
use crate::traits::{TextExtractor, AI};

enum ScriptedResponse {
    Text(String),
    Failure(String),
}

/// A mock AI implementation for testing.
///
/// Returns scripted responses in order and records every prompt it was
/// given, so tests can assert on prompt content. Cloning shares the
/// script and the call log, so tests can keep a handle after handing the
/// mock to an analyzer.
#[derive(Default, Clone)]
pub struct MockAI {
    responses: Arc<RwLock<VecDeque<ScriptedResponse>>>,
    calls: Arc<RwLock<Vec<String>>>,
    model: String,
}

impl MockAI {
    /// Create a new mock AI with no scripted responses.
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            ..Default::default()
        }
    }

    /// Queue a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .push_back(ScriptedResponse::Text(text.into()));
        self
    }

    /// Queue an invocation failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .push_back(ScriptedResponse::Failure(message.into()));
        self
    }

    /// Set the reported model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// All prompts sent to this mock, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl AI for MockAI {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.write().unwrap().push(prompt.to_string());

        match self.responses.write().unwrap().pop_front() {
            Some(ScriptedResponse::Text(text)) => Ok(text),
            Some(ScriptedResponse::Failure(message)) => Err(AnalysisError::invocation(message)),
            None => Err(AnalysisError::invocation(
                "mock AI has no scripted response left",
            )),
        }
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

enum ScriptedExtraction {
    Text(String),
    NotFound(String),
    Empty,
    Invalid,
}

/// A mock text extractor for testing.
///
/// Returns a canned text or a canned failure without touching any real PDF
/// machinery.
pub struct MockExtractor {
    result: ScriptedExtraction,
    calls: Arc<RwLock<usize>>,
}

impl MockExtractor {
    /// Extractor that always succeeds with the given text.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            result: ScriptedExtraction::Text(text.into()),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    /// Extractor that fails as if the blob store key had expired.
    pub fn failing_not_found(key: impl Into<String>) -> Self {
        Self {
            result: ScriptedExtraction::NotFound(key.into()),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    /// Extractor that fails with an empty-document error.
    pub fn failing_empty() -> Self {
        Self {
            result: ScriptedExtraction::Empty,
            calls: Arc::new(RwLock::new(0)),
        }
    }

    /// Extractor that fails as if the bytes were not a PDF.
    pub fn failing_invalid() -> Self {
        Self {
            result: ScriptedExtraction::Invalid,
            calls: Arc::new(RwLock::new(0)),
        }
    }

    /// How many times extraction was attempted.
    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract_text(&self, _bytes: &[u8]) -> ExtractionResult<String> {
        *self.calls.write().unwrap() += 1;

        match &self.result {
            ScriptedExtraction::Text(text) => Ok(text.clone()),
            ScriptedExtraction::NotFound(key) => {
                Err(ExtractionError::DocumentNotFound { key: key.clone() })
            }
            ScriptedExtraction::Empty => Err(ExtractionError::EmptyDocument),
            ScriptedExtraction::Invalid => Err(ExtractionError::InvalidDocument),
        }
    }
}
