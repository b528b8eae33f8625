//! Bridges the editing controller to the window.
//!
//! All callbacks run on the UI thread, so the controller lives in an
//! `Rc<RefCell<_>>` shared by the callbacks and the capture timer.

use super::dialog;
use crate::{
    config, editor_cb, global_store,
    slint_generatedAppWindow::{AppWindow, SessionKind},
};
use editor::{
    BrightnessForm, ChannelSelection, Controller, CropForm, DisplaySurface, EditRequest,
    EditSession, EditorError, LineForm,
};
use slint::{
    CloseRequestResponse, ComponentHandle, Rgb8Pixel, SharedPixelBuffer, Timer, TimerMode,
};
use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
    sync::atomic::Ordering,
};

struct EditorState {
    controller: RefCell<Controller>,
    timer: Timer,
}

type State = Rc<EditorState>;

impl From<EditSession> for SessionKind {
    fn from(session: EditSession) -> Self {
        match session {
            EditSession::Idle => SessionKind::Idle,
            EditSession::Capturing => SessionKind::Capturing,
            EditSession::Cropping => SessionKind::Cropping,
            EditSession::Brightening => SessionKind::Brightening,
            EditSession::LineDrawing => SessionKind::LineDrawing,
        }
    }
}

pub fn init(ui: &AppWindow) {
    let state = Rc::new(EditorState {
        controller: RefCell::new(Controller::new(config::all().to_editor_config())),
        timer: Timer::default(),
    });

    editor_cb!(load_image, ui, state);
    editor_cb!(save_image, ui, state);
    editor_cb!(start_capture, ui, state);
    editor_cb!(snapshot, ui, state);
    editor_cb!(cancel, ui, state);
    editor_cb!(begin_crop, ui, state);
    editor_cb!(begin_brighten, ui, state);
    editor_cb!(begin_line, ui, state);
    editor_cb!(apply_crop, ui, state);
    editor_cb!(apply_brighten, ui, state);
    editor_cb!(apply_line, ui, state);
    editor_cb!(channels_changed, ui, state);

    let ui_weak = ui.as_weak();
    let close_state = state.clone();
    ui.window().on_close_requested(move || {
        close_state.timer.stop();
        close_state.controller.borrow_mut().shutdown();

        if let Some(ui) = ui_weak.upgrade() {
            save_window_size(&ui);
        }
        CloseRequestResponse::HideWindow
    });

    refresh(ui, &state);
}

fn load_image(ui: &AppWindow, state: &State) {
    let Some(path) = dialog::pick_image_file(last_dir().as_deref()) else {
        return;
    };

    let result = state.controller.borrow_mut().load_image(&path);
    match result {
        Ok(_) => remember_dir(&path),
        Err(e) => dialog::show_error(&e),
    }

    refresh(ui, state);
}

fn save_image(ui: &AppWindow, state: &State) {
    if state.controller.borrow().frame().is_none() {
        dialog::show_error(&EditorError::NoImageLoaded);
        return;
    }

    let Some(path) = dialog::pick_save_file(last_dir().as_deref(), &default_save_name()) else {
        return;
    };

    let result = state.controller.borrow().save_image(&path);
    match result {
        Ok(_) => remember_dir(&path),
        Err(e) => dialog::show_error(&e),
    }

    refresh(ui, state);
}

fn start_capture(ui: &AppWindow, state: &State) {
    let result = state.controller.borrow_mut().start_capture();
    if let Err(e) = result {
        dialog::show_error(&e);
        refresh(ui, state);
        return;
    }

    let (interval, token) = {
        let controller = state.controller.borrow();
        (controller.config().capture_interval, controller.capture_token())
    };
    let Some(token) = token else {
        refresh(ui, state);
        return;
    };

    let ui_weak = ui.as_weak();
    let state_weak = Rc::downgrade(state);

    state.timer.start(TimerMode::Repeated, interval, move || {
        let (Some(ui), Some(state)) = (ui_weak.upgrade(), state_weak.upgrade()) else {
            return;
        };

        if !token.load(Ordering::Relaxed) {
            state.timer.stop();
            return;
        }

        let published = state.controller.borrow_mut().capture_tick();

        if published {
            refresh_canvas(&ui, &state);
        }
    });

    refresh(ui, state);
}

fn snapshot(ui: &AppWindow, state: &State) {
    state.timer.stop();
    state.controller.borrow_mut().snapshot();
    refresh(ui, state);
}

fn cancel(ui: &AppWindow, state: &State) {
    state.timer.stop();
    state.controller.borrow_mut().cancel();
    refresh(ui, state);
}

fn begin_crop(ui: &AppWindow, state: &State) {
    let result = state.controller.borrow_mut().begin_crop();
    match result {
        Ok(form) => {
            let store = global_store!(ui);
            store.set_form_x1(form.x1.into());
            store.set_form_y1(form.y1.into());
            store.set_form_x2(form.x2.into());
            store.set_form_y2(form.y2.into());
        }
        Err(e) => dialog::show_error(&e),
    }

    refresh(ui, state);
}

fn begin_brighten(ui: &AppWindow, state: &State) {
    let result = state.controller.borrow_mut().begin_brighten();
    match result {
        Ok(form) => global_store!(ui).set_form_brightness(form.delta.into()),
        Err(e) => dialog::show_error(&e),
    }

    refresh(ui, state);
}

fn begin_line(ui: &AppWindow, state: &State) {
    let result = state.controller.borrow_mut().begin_line();
    match result {
        Ok(form) => {
            let store = global_store!(ui);
            store.set_form_x1(form.x1.into());
            store.set_form_y1(form.y1.into());
            store.set_form_x2(form.x2.into());
            store.set_form_y2(form.y2.into());
            store.set_form_thickness(form.thickness.into());
        }
        Err(e) => dialog::show_error(&e),
    }

    refresh(ui, state);
}

fn apply_crop(ui: &AppWindow, state: &State) {
    let store = global_store!(ui);
    let form = CropForm::new(
        store.get_form_x1(),
        store.get_form_y1(),
        store.get_form_x2(),
        store.get_form_y2(),
    );

    apply(ui, state, EditRequest::Crop(form));
}

fn apply_brighten(ui: &AppWindow, state: &State) {
    let form = BrightnessForm::new(global_store!(ui).get_form_brightness());
    apply(ui, state, EditRequest::Brighten(form));
}

fn apply_line(ui: &AppWindow, state: &State) {
    let store = global_store!(ui);
    let form = LineForm::new(
        store.get_form_x1(),
        store.get_form_y1(),
        store.get_form_x2(),
        store.get_form_y2(),
        store.get_form_thickness(),
    );

    apply(ui, state, EditRequest::Line(form));
}

fn apply(ui: &AppWindow, state: &State, request: EditRequest) {
    let result = state.controller.borrow_mut().apply(&request);
    if let Err(e) = result {
        dialog::show_error(&e);
    }

    refresh(ui, state);
}

fn channels_changed(ui: &AppWindow, state: &State) {
    let store = global_store!(ui);
    let channels = ChannelSelection::new(
        store.get_show_red(),
        store.get_show_green(),
        store.get_show_blue(),
    );

    state.controller.borrow_mut().set_channels(channels);
    refresh_canvas(ui, state);
}

fn refresh(ui: &AppWindow, state: &State) {
    {
        let controller = state.controller.borrow();
        let store = global_store!(ui);
        store.set_session(controller.session().into());
        store.set_controls_enabled(controller.controls_enabled());
        store.set_has_image(controller.frame().is_some());
    }

    refresh_canvas(ui, state);
}

fn refresh_canvas(ui: &AppWindow, state: &State) {
    let image = match state.controller.borrow().render() {
        Some(surface) => to_slint_image(&surface),
        None => slint::Image::default(),
    };

    global_store!(ui).set_canvas(image);
}

fn to_slint_image(surface: &DisplaySurface) -> slint::Image {
    let buffer = SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(
        &surface.pixels,
        surface.width,
        surface.height,
    );
    slint::Image::from_rgb8(buffer)
}

fn default_save_name() -> String {
    format!("rgbshot-{}.png", cutil::time::local_now("%Y%m%d-%H%M%S"))
}

fn last_dir() -> Option<PathBuf> {
    let dir = config::all().preference.last_dir;
    (!dir.is_empty()).then(|| PathBuf::from(dir))
}

fn remember_dir(path: &Path) {
    let Some(dir) = path.parent().and_then(|dir| dir.to_str()) else {
        return;
    };

    let mut all = config::all();
    if all.preference.last_dir == dir {
        return;
    }

    all.preference.last_dir = dir.to_string();
    if let Err(e) = config::save(all) {
        log::warn!("{e:?}");
    }
}

fn save_window_size(ui: &AppWindow) {
    let window = ui.window();
    let size = window.size().to_logical(window.scale_factor());

    let mut all = config::all();
    all.preference.win_width = size.width.max(1.0) as u32;
    all.preference.win_height = size.height.max(1.0) as u32;

    if let Err(e) = config::save(all) {
        log::warn!("{e:?}");
    }
}
