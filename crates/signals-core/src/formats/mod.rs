//! # Formats Module
//!
//! Conversion of reference data to and from JSON.
//!
//! This module only handles format conversion (pure transformations).
//! Reading and writing files stays in the app layer (apps/career-signals).

mod json;

pub use json::*;
