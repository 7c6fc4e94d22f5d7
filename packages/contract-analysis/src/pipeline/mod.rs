//! Analysis pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Prompt construction (tier-aware, type-aware)
//! - Model invocation through the [`crate::traits::AI`] trait
//! - Response normalization with layered malformed-JSON recovery
//! - Record assembly for the caller's persistence layer

pub mod analyzer;
pub mod normalize;
pub mod prompts;

pub use analyzer::{Analyzer, AnalyzerConfig, UNKNOWN_CONTRACT_TYPE};
pub use normalize::{
    invocation_fallback_analysis, normalize_analysis, normalize_analysis_with_stage, repair_json,
    salvage_analysis, strip_code_fences, RecoveryStage,
};
pub use prompts::{
    format_analysis_prompt, format_type_detection_prompt, TYPE_DETECTION_EXCERPT_CHARS,
};
