//! # Career Signals Library
//!
//! This library exposes the Career Signals modules for testing and
//! integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;

// Re-export signals_core for convenience
pub use signals_core;
