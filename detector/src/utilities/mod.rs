//! # Utilities
//!
//! Helper functions shared across the detection engine.
//!
//! - [`text`]: case/whitespace normalization, tokenization, and bounded numeric parsing.
//! - [`similarity`]: edit-distance based string similarity for fuzzy trap matching.

pub mod similarity;
pub mod text;
