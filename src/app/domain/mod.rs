//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Application configuration and the recent-document list
//! - Note document file types
//! - Event types for the dispatch loop

pub mod config;
pub mod doc_type;
pub mod events;
pub mod recent_docs;

pub use config::{AppConfig, DocRestore, ThemeMode, WindowGeometry};
pub use doc_type::{DocFileType, DocStorage};
pub use events::{AppEvent, WindowId};
pub use recent_docs::RecentDocs;
