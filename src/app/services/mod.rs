//! Services layer - process-wide collaborators shared by all windows.
//!
//! This module contains:
//! - The action registry and the menu layout built from it
//! - Scratch space for transient files
//! - Shared presentation resources (icons, tags, languages, schemes, CSS)
//! - Document container probing
//! - Forwarding of later launches to the running instance

pub mod actions;
pub mod doc_loader;
pub mod instance;
pub mod menu;
pub mod resources;
pub mod tmp;
