use std::path::PathBuf;

use crate::app::domain::recent_docs::RecentDocs;
use crate::app::services::actions::{Accel, ActionRegistry};

/// Submenu holding one item per recent document.
pub const RECENT_DOCS_MENU: &str = "File/Recent Documents";

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    /// Slash separated menu path, e.g. "File/Open..."
    pub path: String,
    pub action: &'static str,
    pub accel: Option<Accel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentMenuItem {
    pub label: String,
    pub path: PathBuf,
}

/// Menu layout shared by every window. Built once from the action registry;
/// each window installs it into its own menu bar.
#[derive(Debug, Default)]
pub struct MenuBuilder {
    entries: Vec<MenuEntry>,
}

impl MenuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_actions(&mut self, registry: &ActionRegistry) {
        self.entries = registry
            .actions()
            .iter()
            .map(|action| MenuEntry {
                path: format!("{}/{}", action.category, action.label),
                action: action.name,
                accel: action.accel,
            })
            .collect();
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn recent_document_items(&self, recent: &RecentDocs) -> Vec<RecentMenuItem> {
        recent
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                RecentMenuItem {
                    // Slashes would open a nested submenu
                    label: format!("{}. {}", i + 1, name.replace('/', "\\/")),
                    path: path.to_path_buf(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_actions_lays_out_registry() {
        let registry = ActionRegistry::new();
        let mut menu = MenuBuilder::new();
        assert!(menu.entries().is_empty());

        menu.init_actions(&registry);
        assert_eq!(menu.entries().len(), registry.actions().len());

        let open = menu.entries().iter().find(|e| e.action == "open_document").unwrap();
        assert_eq!(open.path, "File/Open...");
        assert_eq!(open.accel, Some(Accel::ctrl('o')));
    }

    #[test]
    fn test_recent_document_items() {
        let mut recent = RecentDocs::new();
        recent.move_or_push_front("/notes/work.ctb");
        recent.move_or_push_front("/notes/home.ctd");

        let items = MenuBuilder::new().recent_document_items(&recent);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "1. home.ctd");
        assert_eq!(items[0].path, PathBuf::from("/notes/home.ctd"));
        assert_eq!(items[1].label, "2. work.ctb");
    }
}
