//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (AppConfig, RecentDocs, AppEvent)
//! - `controllers/` - Orchestration (ApplicationController, DocumentWindow)
//! - `services/` - Shared collaborators (actions, menu, temp files, resources)
//! - `infrastructure/` - Errors and the operator console

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use controllers::application::{AppOptions, ApplicationController};
pub use controllers::window::{DocumentWindow, HideSignal, PreferencesDialog, WindowContext};
pub use domain::{AppConfig, AppEvent, DocFileType, RecentDocs, WindowId};
pub use infrastructure::console::{Console, MemoryConsole, StdoutConsole};
pub use infrastructure::error::{AppError, Result};
