//! Reference AI implementations.
//!
//! Enabled with the `gemini` feature; applications with their own model
//! client only need the [`crate::traits::AI`] trait.

mod gemini;

pub use gemini::GeminiAI;
