use crate::app::domain::events::WindowId;

/// What an action does once invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewWindow,
    OpenDocument,
    ImportDocument,
    CloseWindow,
    Preferences,
    Quit,
}

/// Who carries out a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    /// Handled by the application controller
    App,
    /// Forwarded to the target window
    Window,
}

impl Command {
    pub fn scope(&self) -> CommandScope {
        match self {
            Command::NewWindow | Command::Preferences | Command::Quit => CommandScope::App,
            Command::OpenDocument | Command::ImportDocument | Command::CloseWindow => CommandScope::Window,
        }
    }
}

/// Keyboard accelerator, toolkit independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accel {
    pub ctrl: bool,
    pub shift: bool,
    pub key: char,
}

impl Accel {
    pub const fn ctrl(key: char) -> Self {
        Self { ctrl: true, shift: false, key }
    }

    pub const fn ctrl_shift(key: char) -> Self {
        Self { ctrl: true, shift: true, key }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: &'static str,
    pub category: &'static str,
    pub label: &'static str,
    pub accel: Option<Accel>,
    pub command: Command,
}

/// A resolved invocation: the command and the window it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub window: Option<WindowId>,
}

const BUILTIN_ACTIONS: &[Action] = &[
    Action {
        name: "new_window",
        category: "File",
        label: "New Window",
        accel: Some(Accel::ctrl_shift('n')),
        command: Command::NewWindow,
    },
    Action {
        name: "open_document",
        category: "File",
        label: "Open...",
        accel: Some(Accel::ctrl('o')),
        command: Command::OpenDocument,
    },
    Action {
        name: "import_document",
        category: "File",
        label: "Import...",
        accel: None,
        command: Command::ImportDocument,
    },
    Action {
        name: "preferences",
        category: "Edit",
        label: "Preferences...",
        accel: Some(Accel::ctrl_shift('p')),
        command: Command::Preferences,
    },
    Action {
        name: "close_window",
        category: "File",
        label: "Close Window",
        accel: Some(Accel::ctrl('w')),
        command: Command::CloseWindow,
    },
    Action {
        name: "quit",
        category: "File",
        label: "Quit",
        accel: Some(Accel::ctrl('q')),
        command: Command::Quit,
    },
];

/// Process-wide catalog of invokable commands.
pub struct ActionRegistry {
    actions: Vec<Action>,
    bound_window: Option<WindowId>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: BUILTIN_ACTIONS.to_vec(),
            bound_window: None,
        }
    }

    /// Bind the actions to a freshly created window. Invocations that do
    /// not name their origin window target the last bound one.
    pub fn init(&mut self, window: WindowId) {
        self.bound_window = Some(window);
    }

    /// Drop the binding to a destroyed window, moving it to `fallback`.
    /// Bindings to other windows are left alone.
    pub fn release(&mut self, window: WindowId, fallback: Option<WindowId>) {
        if self.bound_window == Some(window) {
            self.bound_window = fallback;
        }
    }

    pub fn bound_window(&self) -> Option<WindowId> {
        self.bound_window
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn find(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn resolve(&self, name: &str, origin: Option<WindowId>) -> Option<Invocation> {
        let action = self.find(name)?;
        Some(Invocation {
            command: action.command,
            window: origin.or(self.bound_window),
        })
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_are_unique() {
        let registry = ActionRegistry::new();
        let mut names: Vec<&str> = registry.actions().iter().map(|a| a.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_resolve_targets_bound_window() {
        let mut registry = ActionRegistry::new();
        assert_eq!(registry.resolve("quit", None).unwrap().window, None);

        registry.init(WindowId(1));
        registry.init(WindowId(2));
        let inv = registry.resolve("open_document", None).unwrap();
        assert_eq!(inv.command, Command::OpenDocument);
        assert_eq!(inv.window, Some(WindowId(2)));

        let inv = registry.resolve("open_document", Some(WindowId(1))).unwrap();
        assert_eq!(inv.window, Some(WindowId(1)));
    }

    #[test]
    fn test_release_moves_binding_off_destroyed_window() {
        let mut registry = ActionRegistry::new();
        registry.init(WindowId(1));
        registry.init(WindowId(2));

        registry.release(WindowId(1), Some(WindowId(2)));
        assert_eq!(registry.bound_window(), Some(WindowId(2)));

        registry.release(WindowId(2), Some(WindowId(1)));
        assert_eq!(registry.bound_window(), Some(WindowId(1)));

        registry.release(WindowId(1), None);
        assert_eq!(registry.bound_window(), None);
        assert_eq!(registry.resolve("open_document", None).unwrap().window, None);
    }

    #[test]
    fn test_resolve_unknown_action() {
        let registry = ActionRegistry::new();
        assert!(registry.resolve("format_bold", None).is_none());
    }

    #[test]
    fn test_command_scope() {
        assert_eq!(Command::Quit.scope(), CommandScope::App);
        assert_eq!(Command::NewWindow.scope(), CommandScope::App);
        assert_eq!(Command::CloseWindow.scope(), CommandScope::Window);
        assert_eq!(Command::ImportDocument.scope(), CommandScope::Window);
    }
}
