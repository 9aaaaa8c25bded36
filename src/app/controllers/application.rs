use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use super::window::{DocumentWindow, HideSignal, PreferencesDialog, WindowContext};
use crate::app::domain::config::AppConfig;
use crate::app::domain::doc_type::usage_text;
use crate::app::domain::events::{AppEvent, WindowId};
use crate::app::infrastructure::console::{Console, StdoutConsole};
use crate::app::infrastructure::error::Result;
use crate::app::services::actions::{ActionRegistry, Command, CommandScope};
use crate::app::services::menu::MenuBuilder;
use crate::app::services::resources::{
    CssProvider, ICONS_RESOURCE_PATH, IconTheme, LanguageManager, SharedResources, StyleSchemeManager,
    TextTagTable,
};
use crate::app::services::tmp::TempManager;

pub struct AppOptions {
    pub config_path: PathBuf,
    pub console: Box<dyn Console>,
    /// Program name shown in the usage line
    pub program_name: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            config_path: AppConfig::get_config_path(),
            console: Box::new(StdoutConsole),
            program_name: "cherrypad".to_string(),
        }
    }
}

/// Owns the process-wide state and the lifecycle of every document window.
///
/// One instance per process. All methods run on the host event loop's
/// dispatch flow; windows talk back through the event channel.
pub struct ApplicationController<W: DocumentWindow> {
    config: Rc<RefCell<AppConfig>>,
    actions: Rc<RefCell<ActionRegistry>>,
    tmp: Rc<TempManager>,
    menu: Rc<MenuBuilder>,
    resources: SharedResources,
    /// Live windows in creation order; the first is the main window
    windows: Vec<W>,
    next_window_id: u64,
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
    console: Box<dyn Console>,
    program_name: String,
    quit_requested: bool,
}

impl<W: DocumentWindow> ApplicationController<W> {
    /// Build the shared state in a fixed order. A broken configuration falls
    /// back to defaults; failing to set up scratch space is a startup error.
    pub fn new(options: AppOptions) -> Result<Self> {
        let config = AppConfig::load_from(options.config_path);

        let actions = ActionRegistry::new();

        let mut icon_theme = IconTheme::new();
        icon_theme.add_resource_path(ICONS_RESOURCE_PATH);

        let tmp = TempManager::new()?;

        let text_tag_table = TextTagTable::new();
        let language_manager = LanguageManager::new();
        let style_scheme_manager = StyleSchemeManager::new();
        let mut css_provider = CssProvider::new();
        css_provider.load_from_config(&config, &style_scheme_manager);

        let mut menu = MenuBuilder::new();
        menu.init_actions(&actions);

        let (sender, receiver) = mpsc::channel();

        log::debug!("Application initialized, config at {}", config.file_path().display());

        Ok(Self {
            config: Rc::new(RefCell::new(config)),
            actions: Rc::new(RefCell::new(actions)),
            tmp: Rc::new(tmp),
            menu: Rc::new(menu),
            resources: SharedResources {
                icon_theme: Rc::new(RefCell::new(icon_theme)),
                text_tag_table: Rc::new(RefCell::new(text_tag_table)),
                css_provider: Rc::new(RefCell::new(css_provider)),
                language_manager: Rc::new(language_manager),
                style_scheme_manager: Rc::new(style_scheme_manager),
            },
            windows: Vec::new(),
            next_window_id: 1,
            sender,
            receiver,
            console: options.console,
            program_name: options.program_name,
            quit_requested: false,
        })
    }

    // --- Accessors ---

    pub fn config(&self) -> &Rc<RefCell<AppConfig>> {
        &self.config
    }

    pub fn actions(&self) -> &Rc<RefCell<ActionRegistry>> {
        &self.actions
    }

    pub fn menu(&self) -> &MenuBuilder {
        &self.menu
    }

    pub fn tmp(&self) -> &TempManager {
        &self.tmp
    }

    pub fn resources(&self) -> &SharedResources {
        &self.resources
    }

    /// Sender for host-originated events (launch arguments, toolkit signals).
    pub fn event_sender(&self) -> Sender<AppEvent> {
        self.sender.clone()
    }

    pub fn windows(&self) -> &[W] {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut [W] {
        &mut self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&W> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn position(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }

    // --- Window lifecycle ---

    /// Construct a window wired to the shared state and bind the actions to it.
    pub fn create_window(&mut self) -> &mut W {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;

        let ctx = WindowContext {
            id,
            config: self.config.clone(),
            actions: self.actions.clone(),
            tmp: self.tmp.clone(),
            menu: self.menu.clone(),
            resources: self.resources.clone(),
            events: self.sender.clone(),
            hide: HideSignal::new(id, self.sender.clone()),
        };
        let window = W::new(ctx);
        self.actions.borrow_mut().init(id);
        self.windows.push(window);
        log::debug!("Created {} ({} open)", id, self.windows.len());

        let last = self.windows.len() - 1;
        &mut self.windows[last]
    }

    fn main_window_index(&mut self) -> usize {
        if self.windows.is_empty() {
            self.create_window();
        }
        0
    }

    /// The first live window, created if there is none.
    pub fn get_or_create_main_window(&mut self) -> &mut W {
        let idx = self.main_window_index();
        &mut self.windows[idx]
    }

    /// Snapshot the window's status, persist the configuration, then drop
    /// the window. Hides of windows already torn down are ignored. Actions
    /// bound to the dropped window move to the newest remaining one.
    pub fn on_hide_window(&mut self, id: WindowId) {
        let Some(idx) = self.position(id) else {
            log::debug!("Ignoring hide of {}, already destroyed", id);
            return;
        };

        self.windows[idx].config_update_data_from_curr_status();
        if let Err(e) = self.config.borrow().write_to_file() {
            log::error!("Failed to write configuration: {}", e);
        }
        let window = self.windows.remove(idx);
        drop(window);
        let fallback = self.windows.last().map(|w| w.id());
        self.actions.borrow_mut().release(id, fallback);
        log::debug!("Destroyed {} ({} open)", id, self.windows.len());
    }

    // --- Entry points ---

    /// Run without file arguments: always a new window, reopening the most
    /// recent document when there is one.
    pub fn on_activate(&mut self) -> WindowId {
        let id = self.create_window().id();
        let idx = self.windows.len() - 1;
        self.windows[idx].present();

        let front = self.config.borrow().recent_docs.front().map(Path::to_path_buf);
        if let Some(path) = front {
            if path.exists() {
                if !self.windows[idx].read_nodes_from_file(&path, false) {
                    self.print_help_message();
                }
            } else {
                self.console.print_line(&format!("? not found {}", path.display()));
                self.config.borrow_mut().recent_docs.move_or_push_back(path);
                self.windows[idx].set_menu_items_recent_documents();
            }
        }
        id
    }

    /// Run with file arguments: every file goes into the main window, which
    /// is presented once at the end.
    pub fn on_open(&mut self, files: &[PathBuf]) -> WindowId {
        let idx = self.main_window_index();

        for file in files {
            if file.exists() {
                if !self.windows[idx].read_nodes_from_file(file, false) {
                    self.print_help_message();
                }
            } else {
                self.console.print_line(&format!("!! Missing file {}", file.display()));
            }
        }

        self.windows[idx].present();
        self.windows[idx].id()
    }

    fn on_open_recent(&mut self, window: WindowId, path: PathBuf) {
        let idx = match self.position(window) {
            Some(idx) => idx,
            None => self.main_window_index(),
        };

        if path.exists() {
            if !self.windows[idx].read_nodes_from_file(&path, false) {
                self.print_help_message();
            }
        } else {
            self.console.print_line(&format!("? not found {}", path.display()));
            self.config.borrow_mut().recent_docs.move_or_push_back(path);
            self.windows[idx].set_menu_items_recent_documents();
        }
    }

    fn on_action(&mut self, name: &str, origin: Option<WindowId>) {
        let resolved = self.actions.borrow().resolve(name, origin);
        let Some(invocation) = resolved else {
            log::warn!("Unknown action '{}'", name);
            return;
        };

        match invocation.command.scope() {
            CommandScope::Window => {
                match invocation.window.and_then(|id| self.position(id)) {
                    Some(idx) => self.windows[idx].handle_command(invocation.command),
                    None => log::warn!("No window to run '{}'", name),
                }
            }
            CommandScope::App => match invocation.command {
                Command::NewWindow => {
                    self.on_activate();
                }
                Command::Preferences => self.dialog_preferences(),
                Command::Quit => self.quit_application(),
                other => log::warn!("{:?} is not an application command", other),
            },
        }
    }

    /// Ask the host loop to stop. Open windows are closed by the host's
    /// teardown, which runs the usual hide handling for each.
    pub fn quit_application(&mut self) {
        log::debug!("Quit requested with {} window(s) open", self.windows.len());
        self.quit_requested = true;
    }

    /// Show the preferences dialog for the main window and block until it
    /// is dismissed.
    pub fn dialog_preferences(&mut self) {
        let mut dialog = self.get_or_create_main_window().preferences_dialog();
        dialog.show();
        dialog.run();
        dialog.hide();
    }

    // --- Dispatch ---

    pub fn dispatch(&mut self, event: AppEvent) {
        log::debug!("Dispatching {:?}", event);
        match event {
            AppEvent::Activate => {
                self.on_activate();
            }
            AppEvent::Open(files) => {
                self.on_open(&files);
            }
            AppEvent::WindowHidden(id) => self.on_hide_window(id),
            AppEvent::Action { name, window } => self.on_action(&name, window),
            AppEvent::OpenRecent { window, path } => self.on_open_recent(window, path),
            AppEvent::ShowPreferences => self.dialog_preferences(),
            AppEvent::Quit => self.quit_application(),
        }
    }

    /// Dispatch queued events in order, including any queued while
    /// draining. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.receiver.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    fn print_help_message(&mut self) {
        let usage = usage_text(&self.program_name);
        self.console.print_line(&usage);
    }
}
