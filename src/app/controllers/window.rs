use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use crate::app::domain::config::AppConfig;
use crate::app::domain::events::{AppEvent, WindowId};
use crate::app::services::actions::{ActionRegistry, Command};
use crate::app::services::menu::MenuBuilder;
use crate::app::services::resources::SharedResources;
use crate::app::services::tmp::TempManager;

/// A window's "I am hidden" notification. Emitting it queues
/// `AppEvent::WindowHidden` for the controller that created the window.
#[derive(Debug, Clone)]
pub struct HideSignal {
    window: WindowId,
    sender: Sender<AppEvent>,
}

impl HideSignal {
    pub fn new(window: WindowId, sender: Sender<AppEvent>) -> Self {
        Self { window, sender }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn emit(&self) {
        if self.sender.send(AppEvent::WindowHidden(self.window)).is_err() {
            // Controller already gone, nothing left to notify
            log::debug!("Hide of {} after controller shutdown", self.window);
        }
    }
}

/// Everything a window receives at construction. All handles are shared
/// with the controller and every other window; a window owns none of them.
#[derive(Clone)]
pub struct WindowContext {
    pub id: WindowId,
    pub config: Rc<RefCell<AppConfig>>,
    pub actions: Rc<RefCell<ActionRegistry>>,
    pub tmp: Rc<TempManager>,
    pub menu: Rc<MenuBuilder>,
    pub resources: SharedResources,
    /// For menu callbacks and other window-originated events
    pub events: Sender<AppEvent>,
    pub hide: HideSignal,
}

impl WindowContext {
    /// Record a successful, non-import open in the recent-document list.
    pub fn note_opened(&self, path: &Path) {
        self.config.borrow_mut().recent_docs.move_or_push_front(path);
    }

    pub fn send(&self, event: AppEvent) {
        if self.events.send(event).is_err() {
            log::debug!("Event from {} after controller shutdown", self.id);
        }
    }
}

/// Modal preferences dialog bound to a window.
pub trait PreferencesDialog {
    fn show(&mut self);
    /// Block until the dialog is dismissed.
    fn run(&mut self);
    fn hide(&mut self);
}

/// A top-level document editing surface.
pub trait DocumentWindow {
    type Preferences: PreferencesDialog;

    fn new(ctx: WindowContext) -> Self
    where
        Self: Sized;

    fn id(&self) -> WindowId;

    /// Load a document. An import merges nodes into the current tree
    /// instead of replacing it. Returns false if the file could not be read.
    fn read_nodes_from_file(&mut self, path: &Path, is_import: bool) -> bool;

    /// Show the window and raise it above the others.
    fn present(&mut self);

    /// Rebuild the recent-documents submenu from the configuration.
    fn set_menu_items_recent_documents(&mut self);

    /// Snapshot geometry and editing position into the shared configuration.
    fn config_update_data_from_curr_status(&mut self);

    /// Carry out a window-scoped command from the action registry.
    fn handle_command(&mut self, command: Command);

    /// Hide the window. Implementations emit their hide signal.
    fn close(&mut self);

    fn preferences_dialog(&self) -> Self::Preferences;
}
