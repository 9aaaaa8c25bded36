use std::path::{Path, PathBuf};

use fltk::{
    dialog,
    enums::{Align, FrameType},
    frame::Frame,
    group::Flex,
    menu::{MenuBar, MenuFlag},
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use crate::app::controllers::window::{DocumentWindow, WindowContext};
use crate::app::domain::config::WindowGeometry;
use crate::app::domain::doc_type::DocStorage;
use crate::app::domain::events::{AppEvent, WindowId};
use crate::app::services::actions::Command;
use crate::app::services::doc_loader::{ProbedDocument, probe_document};
use crate::app::services::menu::RECENT_DOCS_MENU;

use super::dialogs::preferences::FltkPreferencesDialog;
use super::file_dialogs::native_open_dialog;
use super::menu::install_menu;
use super::theme::apply_theme;

const STATUS_BAR_HEIGHT: i32 = 22;

pub struct MainWindow {
    ctx: WindowContext,
    wind: Window,
    menu: MenuBar,
    editor: TextEditor,
    buffer: TextBuffer,
    status: Frame,
    current_doc: Option<PathBuf>,
}

impl MainWindow {
    fn update_window_title(&mut self) {
        match &self.current_doc {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.wind.set_label(&format!("{} - CherryPad", name));
            }
            None => self.wind.set_label("CherryPad"),
        }
    }

    /// Returns how many rich-text tags the document uses.
    fn show_document(&mut self, doc: &ProbedDocument, is_import: bool) -> usize {
        let tags = doc.xml.as_deref().map_or(0, |xml| {
            self.ctx
                .resources
                .text_tag_table
                .borrow_mut()
                .register_rich_text_tags(xml)
        });
        let body = match &doc.xml {
            Some(xml) => xml.clone(),
            None => match doc.file_type.storage() {
                DocStorage::Sqlite => format!("SQLite notes database\n{}\n", doc.path.display()),
                DocStorage::Xml => format!("XML notes document\n{}\n", doc.path.display()),
            },
        };

        if is_import {
            self.buffer.append(&body);
        } else {
            self.buffer.set_text(&body);
        }
        tags
    }

    fn reject_protected(&mut self, path: &Path) {
        match self.ctx.tmp.hidden_file_for(path) {
            Ok(target) => log::warn!(
                "{} is password protected; extracting to {} needs a 7z decoder this build lacks",
                path.display(),
                target.display()
            ),
            Err(e) => log::warn!("{} is password protected and no scratch space is available: {}", path.display(), e),
        }
        self.status.set_label(&format!("Cannot decrypt {}", path.display()));
    }

    fn restore_cursor(&mut self, path: &Path) {
        let cursor = self
            .ctx
            .config
            .borrow()
            .recent_docs_restore
            .get(path)
            .map(|r| r.cursor_pos);
        if let Some(pos) = cursor {
            let pos = pos.clamp(0, self.buffer.length());
            self.editor.set_insert_position(pos);
            self.editor.show_insert_position();
        }
    }

    fn open_with_dialog(&mut self, is_import: bool) {
        let filter = crate::app::domain::doc_type::documents_filter_multiline();
        if let Some(path) = native_open_dialog(&filter) {
            let path = PathBuf::from(path);
            if !self.read_nodes_from_file(&path, is_import) {
                dialog::alert_default(&format!("Could not open {}", path.display()));
            }
        }
    }
}

impl DocumentWindow for MainWindow {
    type Preferences = FltkPreferencesDialog;

    fn new(ctx: WindowContext) -> Self {
        let (geometry, maximized) = {
            let config = ctx.config.borrow();
            (config.win_rect, config.win_is_maximized)
        };
        let WindowGeometry { x, y, width, height } = geometry;

        let mut wind = Window::new(x, y, width, height, "CherryPad");
        wind.set_xclass("CherryPad");

        let mut flex = Flex::new(0, 0, width, height, None);
        flex.set_type(fltk::group::FlexType::Column);

        let mut menu = MenuBar::new(0, 0, 0, 30, "");
        flex.fixed(&menu, 30);

        let buffer = TextBuffer::default();
        let mut editor = TextEditor::new(0, 0, 0, 0, "");
        editor.set_buffer(buffer.clone());

        let mut status = Frame::default();
        status.set_frame(FrameType::FlatBox);
        status.set_align(Align::Left | Align::Inside);
        status.set_label_size(12);
        flex.fixed(&status, STATUS_BAR_HEIGHT);

        flex.end();
        wind.resizable(&flex);
        wind.end();

        install_menu(&mut menu, &ctx);

        let hide = ctx.hide.clone();
        wind.set_callback(move |w| {
            w.hide();
            hide.emit();
        });

        {
            let config = ctx.config.borrow();
            editor.set_text_size(config.font_size as i32);
            editor.wrap_mode(
                if config.word_wrap_enabled { WrapMode::AtBounds } else { WrapMode::None },
                0,
            );
            editor.set_linenumber_width(if config.line_numbers_enabled { 40 } else { 0 });
            let palette = ctx.resources.style_scheme_manager.palette(config.syntax_theme);
            apply_theme(&mut editor, &mut wind, &mut menu, &mut status, config.is_dark(), palette);
        }
        if maximized {
            wind.maximize();
        }

        let mut window = Self {
            ctx,
            wind,
            menu,
            editor,
            buffer,
            status,
            current_doc: None,
        };
        window.set_menu_items_recent_documents();
        window
    }

    fn id(&self) -> WindowId {
        self.ctx.id
    }

    fn read_nodes_from_file(&mut self, path: &Path, is_import: bool) -> bool {
        let doc = match probe_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                return false;
            }
        };
        if doc.file_type.is_protected() {
            self.reject_protected(path);
            return false;
        }

        let tags = self.show_document(&doc, is_import);
        if let Some(language) = self.ctx.resources.language_manager.guess_language(path) {
            log::debug!("{} guessed as {}", path.display(), language);
        }

        if !is_import {
            self.current_doc = Some(path.to_path_buf());
            self.ctx.note_opened(path);
            self.restore_cursor(path);
            self.set_menu_items_recent_documents();
            self.update_window_title();
        }
        self.status.set_label(&format!(
            "{} {} ({} text tags)",
            if is_import { "Imported" } else { "Opened" },
            path.display(),
            tags
        ));
        true
    }

    fn present(&mut self) {
        self.wind.show();
    }

    fn set_menu_items_recent_documents(&mut self) {
        let items = self
            .ctx
            .menu
            .recent_document_items(&self.ctx.config.borrow().recent_docs);

        let idx = self.menu.find_index(RECENT_DOCS_MENU);
        if idx >= 0
            && let Err(e) = self.menu.clear_submenu(idx)
        {
            log::warn!("Failed to clear recent documents menu: {}", e);
        }

        for item in items {
            let ctx = self.ctx.clone();
            let path = item.path;
            self.menu.add(
                &format!("{}/{}", RECENT_DOCS_MENU, item.label),
                fltk::enums::Shortcut::None,
                MenuFlag::Normal,
                move |_| {
                    ctx.send(AppEvent::OpenRecent {
                        window: ctx.id,
                        path: path.clone(),
                    });
                },
            );
        }
    }

    fn config_update_data_from_curr_status(&mut self) {
        let mut config = self.ctx.config.borrow_mut();
        config.win_is_maximized = self.wind.maximize_active();
        if !config.win_is_maximized {
            config.win_rect = WindowGeometry {
                x: self.wind.x(),
                y: self.wind.y(),
                width: self.wind.w(),
                height: self.wind.h(),
            };
        }
        if let Some(doc) = &self.current_doc {
            let restore = config.recent_docs_restore.entry(doc.clone()).or_default();
            restore.cursor_pos = self.editor.insert_position();
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::OpenDocument => self.open_with_dialog(false),
            Command::ImportDocument => self.open_with_dialog(true),
            Command::CloseWindow => self.close(),
            other => log::warn!("{:?} is not a window command", other),
        }
    }

    fn close(&mut self) {
        self.wind.hide();
        self.ctx.hide.emit();
    }

    fn preferences_dialog(&self) -> FltkPreferencesDialog {
        FltkPreferencesDialog::new(&self.wind, self.ctx.config.clone(), self.ctx.resources.clone())
    }
}

impl Drop for MainWindow {
    fn drop(&mut self) {
        Window::delete(self.wind.clone());
    }
}
