use std::fmt;
use std::path::PathBuf;

/// Identity of a top-level document window. Allocated by the application
/// controller and never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// All events that can be sent to the application controller.
/// Windows and menu callbacks send one of these; the dispatch loop in the
/// host handles them one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Started or re-invoked without file arguments
    Activate,
    /// Started or re-invoked with file arguments
    Open(Vec<PathBuf>),
    /// A window was hidden and must be torn down
    WindowHidden(WindowId),
    /// A named action from the registry, optionally from a specific window
    Action { name: String, window: Option<WindowId> },
    /// An entry picked from a window's recent-documents menu
    OpenRecent { window: WindowId, path: PathBuf },
    ShowPreferences,
    Quit,
}
