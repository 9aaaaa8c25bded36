//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Error types
//! - The operator console used for launch diagnostics

pub mod console;
pub mod error;
