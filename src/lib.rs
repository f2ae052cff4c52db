//! SATCHEL — step-limited greedy item selection
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod input;
pub mod selection;
pub mod types;
