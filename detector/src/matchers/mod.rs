//! # Matchers
//!
//! This module provides the matching strategies used to locate a trap in a student
//! submission. Each matcher implements the [`crate::traits::matcher::TrapMatcher`]
//! trait, which lets the detection job compose them into an ordered chain where the
//! first decisive strategy wins.
//!
//! The available matchers are:
//! - [`numeric_matcher`]: Specialized first pass for number traps; compares values
//!   numerically so "11", "11.0" and "eleven" all agree.
//! - [`exact_matcher`]: Case-insensitive, whitespace-normalized substring search.
//! - [`fuzzy_matcher`]: Edit-distance windowed search; the terminal tier that always
//!   produces a classification.

pub mod exact_matcher;
pub mod fuzzy_matcher;
pub mod numeric_matcher;
