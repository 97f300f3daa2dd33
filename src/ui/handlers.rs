use gtk::glib;
use gtk4 as gtk;
use libadwaita as adw;
use log::{debug, info};

use adw::prelude::*;
use gtk::GestureDrag;
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::{Action, AppConfig, CaptureRegion, CaptureSession, OverlayAction, ReleaseOutcome};
use crate::capture::capture_region;
use crate::gallery::Gallery;
use crate::ui::dialogs::show_error;
use crate::ui::launcher::LauncherComponents;
use crate::ui::overlay::OverlayComponents;
use crate::ui::shortcuts::show_shortcuts_dialog;

#[derive(Clone)]
pub struct UiComponents {
    pub launcher: Rc<LauncherComponents>,
    pub overlay: OverlayComponents,
    pub gallery: Rc<Gallery>,
    pub config: Rc<AppConfig>,
    hover_poll: Rc<RefCell<Option<glib::SourceId>>>,
}

impl UiComponents {
    pub fn new(
        launcher: LauncherComponents,
        overlay: OverlayComponents,
        gallery: Rc<Gallery>,
        config: Rc<AppConfig>,
    ) -> Self {
        Self {
            launcher: Rc::new(launcher),
            overlay,
            gallery,
            config,
            hover_poll: Rc::new(RefCell::new(None)),
        }
    }
}

/// Perform the side effects of a state machine transition
pub fn apply_actions(
    state: &Rc<RefCell<CaptureSession>>,
    components: &UiComponents,
    actions: &[OverlayAction],
) {
    for action in actions {
        debug!("Overlay action {:?}", action);
        match action {
            OverlayAction::HideLauncher => components.launcher.window.set_visible(false),
            OverlayAction::ShowLauncher => components.launcher.window.present(),
            OverlayAction::ShowOverlay => {
                components.overlay.cancel_btn.set_visible(true);
                components.overlay.present_fullscreen();
            }
            OverlayAction::HideOverlay => components.overlay.hide(),
            OverlayAction::StartHoverPoll => start_hover_poll(state, components),
            OverlayAction::StopHoverPoll => {
                if let Some(source) = components.hover_poll.borrow_mut().take() {
                    source.remove();
                }
            }
            OverlayAction::Redraw => components.overlay.drawing_area.queue_draw(),
        }
    }
}

fn start_hover_poll(state: &Rc<RefCell<CaptureSession>>, components: &UiComponents) {
    let source = glib::timeout_add_local(components.config.hover_poll_interval, {
        let state = state.clone();
        let cancel_btn = components.overlay.cancel_btn.clone();
        let hover_zone = components.config.hover_zone;
        move || {
            let visible = state.borrow().cancel_visible(hover_zone);
            if cancel_btn.is_visible() != visible {
                cancel_btn.set_visible(visible);
            }
            glib::ControlFlow::Continue
        }
    });

    if let Some(previous) = components.hover_poll.borrow_mut().replace(source) {
        previous.remove();
    }
}

fn start_capture(state: &Rc<RefCell<CaptureSession>>, components: &UiComponents) {
    let actions = state.borrow_mut().start();
    apply_actions(state, components, &actions);
}

fn cancel_capture(state: &Rc<RefCell<CaptureSession>>, components: &UiComponents) {
    let actions = state.borrow_mut().cancel();
    if !actions.is_empty() {
        info!("Capture cancelled");
    }
    apply_actions(state, components, &actions);
}

pub fn connect_launcher_handlers(state: &Rc<RefCell<CaptureSession>>, components: &UiComponents) {
    components.launcher.capture_btn.connect_clicked({
        let state = state.clone();
        let components = components.clone();
        move |_| start_capture(&state, &components)
    });

    let key = gtk::EventControllerKey::new();
    key.connect_key_pressed({
        let state = state.clone();
        let components = components.clone();
        move |_, keyval, _, modifiers| {
            if components.config.shortcuts.get_action(keyval, modifiers) == Some(Action::StartCapture)
            {
                start_capture(&state, &components);
                return glib::Propagation::Stop;
            }
            glib::Propagation::Proceed
        }
    });
    components.launcher.window.add_controller(key);

    // the gallery only hides on close, so quitting follows the launcher
    components.launcher.window.connect_close_request(|window| {
        if let Some(app) = window.application() {
            app.quit();
        }
        glib::Propagation::Proceed
    });
}

pub fn connect_app_actions(app: &adw::Application, components: &UiComponents) {
    let gallery_action = gtk::gio::SimpleAction::new("gallery", None);
    gallery_action.connect_activate({
        let gallery = components.gallery.clone();
        move |_, _| gallery.window.present()
    });
    app.add_action(&gallery_action);

    let shortcuts_action = gtk::gio::SimpleAction::new("shortcuts", None);
    shortcuts_action.connect_activate({
        let components = components.clone();
        move |_, _| show_shortcuts_dialog(&components.config, &components.launcher.window)
    });
    app.add_action(&shortcuts_action);
}

pub fn connect_overlay_handlers(state: &Rc<RefCell<CaptureSession>>, components: &UiComponents) {
    components.overlay.cancel_btn.connect_clicked({
        let state = state.clone();
        let components = components.clone();
        move |_| cancel_capture(&state, &components)
    });

    let motion = gtk::EventControllerMotion::new();
    motion.connect_motion({
        let state = state.clone();
        move |_, _, y| state.borrow_mut().track_pointer(y)
    });
    components.overlay.container.add_controller(motion);

    let key = gtk::EventControllerKey::new();
    key.connect_key_pressed({
        let state = state.clone();
        let components = components.clone();
        move |_, keyval, _, modifiers| {
            if components.config.shortcuts.get_action(keyval, modifiers) == Some(Action::Cancel) {
                cancel_capture(&state, &components);
                return glib::Propagation::Stop;
            }
            glib::Propagation::Proceed
        }
    });
    components.overlay.window.add_controller(key);

    connect_drag_handlers(state, components);
}

fn connect_drag_handlers(state: &Rc<RefCell<CaptureSession>>, components: &UiComponents) {
    let drag = GestureDrag::new();
    drag.set_button(gtk::gdk::BUTTON_PRIMARY);

    drag.connect_drag_begin({
        let state = state.clone();
        let components = components.clone();
        move |_, x, y| {
            let actions = state.borrow_mut().pointer_down(x, y);
            apply_actions(&state, &components, &actions);
        }
    });

    drag.connect_drag_update({
        let state = state.clone();
        let components = components.clone();
        move |gesture, offset_x, offset_y| {
            if let Some((start_x, start_y)) = gesture.start_point() {
                let actions = state
                    .borrow_mut()
                    .pointer_move(start_x + offset_x, start_y + offset_y);
                apply_actions(&state, &components, &actions);
            }
        }
    });

    drag.connect_drag_end({
        let state = state.clone();
        let components = components.clone();
        move |gesture, offset_x, offset_y| {
            if let Some((start_x, start_y)) = gesture.start_point() {
                handle_release(&state, &components, start_x + offset_x, start_y + offset_y);
            }
        }
    });

    components.overlay.drawing_area.add_controller(drag);
}

fn handle_release(state: &Rc<RefCell<CaptureSession>>, components: &UiComponents, x: f64, y: f64) {
    let release = state.borrow_mut().pointer_up(x, y);
    apply_actions(state, components, &release.actions);

    match release.outcome {
        ReleaseOutcome::Ignored => {}
        ReleaseOutcome::Rejected(e) => {
            show_error(Some(components.launcher.window.upcast_ref::<gtk::Window>()), &e.to_string());
        }
        ReleaseOutcome::Capture(region) => {
            // let the compositor drop the overlay before reading pixels
            glib::timeout_add_local_once(components.config.settle_delay, {
                let state = state.clone();
                let components = components.clone();
                move || finish_capture(&state, &components, region)
            });
        }
    }
}

fn finish_capture(
    state: &Rc<RefCell<CaptureSession>>,
    components: &UiComponents,
    region: CaptureRegion,
) {
    let (origin_x, origin_y) = components.overlay.origin.get();
    let result = capture_region(&region.offset(origin_x, origin_y));

    let actions = state.borrow_mut().finish();
    apply_actions(state, components, &actions);

    match result {
        Ok(image) => {
            components.gallery.add(&image);
        }
        Err(e) => show_error(Some(components.launcher.window.upcast_ref::<gtk::Window>()), &e.to_string()),
    }
}

pub fn connect_all_handlers(
    app: &adw::Application,
    state: &Rc<RefCell<CaptureSession>>,
    components: &UiComponents,
) {
    debug!("Initializing UI handlers");
    connect_launcher_handlers(state, components);
    connect_overlay_handlers(state, components);
    connect_app_actions(app, components);
}
