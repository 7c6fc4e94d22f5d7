//! Data types for contract analysis.

pub mod analysis;
pub mod record;
pub mod tier;
