//! FLTK frontend.
//!
//! `MainWindow` is the toolkit binding of `DocumentWindow`; everything it
//! needs arrives through its `WindowContext`.

pub mod dialogs;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod theme;
