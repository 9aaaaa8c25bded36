use fltk::{
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::TextEditor,
    window::Window,
};

type Rgb = (u8, u8, u8);

fn rgb((r, g, b): Rgb) -> Color {
    Color::from_rgb(r, g, b)
}

/// Color the window chrome for light or dark mode. `palette` is the
/// (background, foreground) pair of the configured color scheme and, when
/// present, overrides the editor's default colors.
pub fn apply_theme(
    editor: &mut TextEditor,
    window: &mut Window,
    menu: &mut MenuBar,
    status: &mut Frame,
    is_dark: bool,
    palette: Option<(Rgb, Rgb)>,
) {
    let (chrome, chrome_text, hover) = if is_dark {
        ((35, 35, 35), (220, 220, 220), (60, 60, 60))
    } else {
        ((240, 240, 240), (0, 0, 0), (200, 200, 200))
    };
    let (editor_bg, editor_fg) = palette.unwrap_or(if is_dark {
        ((30, 30, 30), (220, 220, 220))
    } else {
        ((255, 255, 255), (0, 0, 0))
    });

    editor.set_color(rgb(editor_bg));
    editor.set_text_color(rgb(editor_fg));
    editor.set_cursor_color(rgb(editor_fg));
    editor.set_selection_color(if is_dark {
        Color::from_rgb(70, 70, 100)
    } else {
        Color::from_rgb(173, 216, 230)
    });
    editor.set_linenumber_bgcolor(rgb(chrome));
    editor.set_linenumber_fgcolor(if is_dark {
        Color::from_rgb(150, 150, 150)
    } else {
        Color::from_rgb(100, 100, 100)
    });

    window.set_color(rgb(chrome));
    window.set_label_color(rgb(chrome_text));
    menu.set_color(rgb(chrome));
    menu.set_text_color(rgb(chrome_text));
    menu.set_selection_color(rgb(hover));
    status.set_color(rgb(chrome));
    status.set_label_color(rgb(chrome_text));

    editor.redraw();
    window.redraw();
    menu.redraw();
    status.redraw();
}
