//! Core trait abstractions.
//!
//! The library talks to its external collaborators (the generative-text
//! service and the PDF text extractor) only through these traits, so the
//! pipeline can be exercised without network or file I/O.

pub mod ai;
pub mod extractor;

pub use ai::AI;
pub use extractor::TextExtractor;
