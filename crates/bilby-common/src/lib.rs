//! Common utilities for the bilby renderer.
//!
//! This crate provides shared infrastructure used by all pipeline components:
//! - **Warning System** - colored terminal output for unsupported features

pub mod warning;
