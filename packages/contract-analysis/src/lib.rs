//! Contract Review Analysis Library
//!
//! The core of a contract-review backend: classify an uploaded contract and
//! produce a structured risk/opportunity analysis from a generative-text
//! model, tolerating malformed model output through a layered recovery
//! pipeline.
//!
//! # Design Philosophy
//!
//! **Availability over correctness**
//!
//! - The model is asked for JSON but never trusted to return it
//! - Every recovery stage degrades gracefully; the caller always gets a
//!   well-formed analysis, possibly one that flags its own degraded content
//! - Classification failure never aborts the flow
//! - Library handles mechanics, app handles routing/auth/persistence
//!
//! # Usage
//!
//! ```rust,ignore
//! use contract_analysis::{Analyzer, Tier};
//! use contract_analysis::testing::{MockAI, MockExtractor};
//!
//! let analyzer = Analyzer::new(
//!     MockExtractor::returning("This agreement is made between..."),
//!     MockAI::new().with_response(r#"{"summary": "...", "overallScore": 70}"#),
//! );
//!
//! let record = analyzer
//!     .analyze_upload(&pdf_bytes, owner_id, Tier::Premium, Some("Employment"))
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (AI, TextExtractor)
//! - [`types`] - Analysis data types and tier policy
//! - [`pipeline`] - Prompts, normalization, and the analyzer
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "gemini")]
pub mod ai;

// Re-export core types at crate root
pub use error::{AnalysisError, ExtractionError, ExtractionResult, Result};
pub use traits::{TextExtractor, AI};
pub use types::{
    analysis::{
        AnalysisResponse, ClauseText, CompensationStructure, FinancialTerms, Impact, Opportunity,
        Risk, Severity, DEFAULT_SCORE, DEFAULT_SUMMARY,
    },
    record::{ContractAnalysis, UserFeedback},
    tier::{Tier, TierConfig},
};

// Re-export the analyzer and pipeline components
pub use pipeline::{
    format_analysis_prompt, format_type_detection_prompt, invocation_fallback_analysis,
    normalize_analysis, normalize_analysis_with_stage, repair_json, salvage_analysis,
    strip_code_fences, Analyzer, AnalyzerConfig, RecoveryStage, TYPE_DETECTION_EXCERPT_CHARS,
    UNKNOWN_CONTRACT_TYPE,
};

#[cfg(feature = "gemini")]
pub use ai::GeminiAI;

// Re-export testing utilities
pub use testing::{MockAI, MockExtractor};
