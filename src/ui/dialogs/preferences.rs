use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app,
    button::{Button, CheckButton, RadioRoundButton},
    enums::Align,
    frame::Frame,
    group::Group,
    menu::Choice,
    misc::Spinner,
    prelude::*,
    window::Window,
};

use crate::app::controllers::window::PreferencesDialog;
use crate::app::domain::config::{AppConfig, SyntaxTheme, ThemeMode};
use crate::app::services::resources::SharedResources;

const MIN_FONT_SIZE: f64 = 8.0;
const MAX_FONT_SIZE: f64 = 48.0;

/// Modal preferences window. Saving writes straight into the shared
/// configuration and regenerates the shared stylesheet; the configuration
/// reaches disk when the next window closes.
pub struct FltkPreferencesDialog {
    dialog: Window,
}

impl FltkPreferencesDialog {
    pub fn new(parent: &Window, config: Rc<RefCell<AppConfig>>, resources: SharedResources) -> Self {
        let mut dialog = Window::default()
            .with_size(350, 380)
            .with_label("Preferences")
            .center_of(parent);
        dialog.make_modal(true);

        let current = config.borrow().clone();

        section_label(15, "Theme:");
        let theme_group = Group::default().with_pos(30, 45).with_size(280, 75);
        let mut theme_light = radio(45, "Light");
        let mut theme_dark = radio(70, "Dark");
        let mut theme_system = radio(95, "System Default");
        theme_group.end();
        match current.theme_mode {
            ThemeMode::Light => theme_light.set_value(true),
            ThemeMode::Dark => theme_dark.set_value(true),
            ThemeMode::SystemDefault => theme_system.set_value(true),
        }

        section_label(130, "Color Scheme:");
        let mut scheme_choice = Choice::default().with_pos(30, 155).with_size(280, 25);
        for theme in SyntaxTheme::all() {
            scheme_choice.add_choice(theme.display_name());
        }
        let scheme_index = SyntaxTheme::all()
            .iter()
            .position(|t| *t == current.syntax_theme)
            .unwrap_or(0);
        scheme_choice.set_value(scheme_index as i32);

        section_label(190, "Font Size:");
        let mut font_size = Spinner::default().with_pos(30, 215).with_size(80, 25);
        font_size.set_range(MIN_FONT_SIZE, MAX_FONT_SIZE);
        font_size.set_step(1.0);
        font_size.set_value(current.font_size as f64);

        section_label(250, "View Options:");
        let mut check_line_numbers = CheckButton::default()
            .with_pos(30, 275)
            .with_size(280, 25)
            .with_label("Show Line Numbers");
        check_line_numbers.set_checked(current.line_numbers_enabled);
        let mut check_word_wrap = CheckButton::default()
            .with_pos(30, 300)
            .with_size(280, 25)
            .with_label("Word Wrap");
        check_word_wrap.set_checked(current.word_wrap_enabled);

        let mut save_btn = Button::default().with_pos(150, 340).with_size(90, 30).with_label("Save");
        let mut cancel_btn = Button::default().with_pos(250, 340).with_size(90, 30).with_label("Cancel");
        dialog.end();

        let mut dialog_save = dialog.clone();
        save_btn.set_callback(move |_| {
            let mut config = config.borrow_mut();
            config.theme_mode = if theme_light.value() {
                ThemeMode::Light
            } else if theme_dark.value() {
                ThemeMode::Dark
            } else {
                ThemeMode::SystemDefault
            };
            if let Some(theme) = usize::try_from(scheme_choice.value())
                .ok()
                .and_then(|i| SyntaxTheme::all().get(i))
            {
                config.syntax_theme = *theme;
            }
            config.font_size = font_size.value().round() as u32;
            config.line_numbers_enabled = check_line_numbers.is_checked();
            config.word_wrap_enabled = check_word_wrap.is_checked();

            let mut css = resources.css_provider.borrow_mut();
            css.load_from_config(&config, &resources.style_scheme_manager);
            log::debug!("Preferences saved, stylesheet now:\n{}", css.to_css_string());
            dialog_save.hide();
        });

        let mut dialog_cancel = dialog.clone();
        cancel_btn.set_callback(move |_| dialog_cancel.hide());

        Self { dialog }
    }
}

fn section_label(y: i32, text: &str) {
    Frame::default()
        .with_pos(15, y)
        .with_size(320, 25)
        .with_label(text)
        .with_align(Align::Left | Align::Inside);
}

fn radio(y: i32, label: &str) -> RadioRoundButton {
    RadioRoundButton::default().with_pos(30, y).with_size(280, 25).with_label(label)
}

impl PreferencesDialog for FltkPreferencesDialog {
    fn show(&mut self) {
        self.dialog.show();
    }

    fn run(&mut self) {
        while self.dialog.shown() {
            app::wait();
            if app::should_program_quit() {
                self.dialog.hide();
            }
        }
    }

    fn hide(&mut self) {
        self.dialog.hide();
    }
}

impl Drop for FltkPreferencesDialog {
    fn drop(&mut self) {
        Window::delete(self.dialog.clone());
    }
}
