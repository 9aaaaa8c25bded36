use fltk::{
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::controllers::window::WindowContext;
use crate::app::domain::events::AppEvent;
use crate::app::services::actions::Accel;
use crate::app::services::menu::RECENT_DOCS_MENU;

/// Install the shared menu layout into a window's menu bar. Every item
/// queues an action event tagged with the owning window.
pub fn install_menu(menu: &mut MenuBar, ctx: &WindowContext) {
    menu.add(RECENT_DOCS_MENU, Shortcut::None, MenuFlag::Submenu, |_| {});

    for entry in ctx.menu.entries() {
        let ctx = ctx.clone();
        let name = entry.action;
        menu.add(&entry.path, to_shortcut(entry.accel), MenuFlag::Normal, move |_| {
            ctx.send(AppEvent::Action {
                name: name.to_string(),
                window: Some(ctx.id),
            });
        });
    }
}

fn to_shortcut(accel: Option<Accel>) -> Shortcut {
    let Some(accel) = accel else {
        return Shortcut::None;
    };
    let mut shortcut = Shortcut::None;
    if accel.ctrl {
        shortcut = shortcut | Shortcut::Ctrl;
    }
    if accel.shift {
        shortcut = shortcut | Shortcut::Shift;
    }
    shortcut | accel.key
}
