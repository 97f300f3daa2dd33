pub mod dialogs;
pub mod drawing;
pub mod handlers;
pub mod launcher;
pub mod overlay;
pub mod shortcuts;
pub mod viewer;

use libadwaita as adw;

use adw::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::{AppConfig, CaptureSession};
use crate::gallery::Gallery;

pub fn build_ui(app: &adw::Application) {
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }

    let config = Rc::new(AppConfig::default());
    let state = Rc::new(RefCell::new(CaptureSession::new()));

    let gallery = Gallery::new(app, config.clone());
    let launcher = launcher::create_launcher(app, &config);
    let overlay = overlay::create_overlay(app, &state, &config);

    let components = handlers::UiComponents::new(launcher, overlay, gallery, config);
    handlers::connect_all_handlers(app, &state, &components);

    components.gallery.window.present();
    components.launcher.window.present();
}
