//! UI logic and callback wiring.

use crate::slint_generatedAppWindow::AppWindow;

mod dialog;
mod image_editor;

#[macro_export]
macro_rules! global_store {
    ($ui:expr) => {
        $ui.global::<crate::slint_generatedAppWindow::Store>()
    };
}

#[macro_export]
macro_rules! global_logic {
    ($ui:expr) => {
        $ui.global::<crate::slint_generatedAppWindow::Logic>()
    };
}

/// Connects a `Logic` callback to a Rust function taking the window and the
/// shared editor state.
#[macro_export]
macro_rules! editor_cb {
    ($callback_name:ident, $ui:expr, $state:expr) => {{
        let ui_weak = $ui.as_weak();
        let state = $state.clone();
        paste::paste! {
            crate::global_logic!($ui)
                .[<on_ $callback_name>](move || {
                    $callback_name(&ui_weak.unwrap(), &state)
                });
        }
    }};
}

pub fn init(ui: &AppWindow) {
    image_editor::init(ui);
}
