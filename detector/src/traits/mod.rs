//!
//! Traits Module
//!
//! Core traits used throughout the detection engine for extensibility and abstraction.
//!
//! - [`matcher`]: Defines the strategy trait for locating one trap in a submission.
//!
//! Implement these traits to extend or customize the engine's behavior with new
//! matching strategies.

pub mod matcher;
