//! Controllers layer - orchestration and coordination.
//!
//! This module contains:
//! - The contract every top-level document window fulfils
//! - The application controller owning shared state and window lifecycle

pub mod application;
pub mod window;
