//! Text extractor trait for uploaded documents.

use async_trait::async_trait;

use crate::error::ExtractionResult;

/// Best-effort text extraction from uploaded document bytes.
///
/// Treated as a black box: bytes in, concatenated page text out. Unlike
/// model invocation failures, extraction failures are never absorbed — a
/// document we cannot read has nothing to analyze, so errors propagate to
/// the caller.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text content of a document.
    async fn extract_text(&self, bytes: &[u8]) -> ExtractionResult<String>;
}
