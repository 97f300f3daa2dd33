use gtk4 as gtk;

use gtk::{glib, DrawingArea};
use gtk4::prelude::*;
use image::RgbaImage;
use log::{debug, error};
use std::rc::Rc;

use crate::actions::{prompt_save, ClipboardManager, ImageAction};
use crate::app::{Action, AppConfig};
use crate::ui::dialogs::attach_context_menu;
use crate::ui::drawing::{draw_image_fit, image_to_pixbuf};

/// Open a window showing `image` scaled to fit, with copy and save actions.
/// The window shares the image with the gallery entry it was opened from.
pub fn show_full_view(
    app: Option<&gtk::Application>,
    image: Rc<RgbaImage>,
    config: Rc<AppConfig>,
) -> gtk::Window {
    let pixbuf = image_to_pixbuf(&image);

    let drawing_area = DrawingArea::builder().hexpand(true).vexpand(true).build();
    drawing_area.set_draw_func(move |_, cr, width, height| {
        draw_image_fit(cr, &pixbuf, width, height);
    });

    let (width, height) = config.viewer_size;
    let window = gtk::Window::builder()
        .title("View Image")
        .child(&drawing_area)
        .default_width(width)
        .default_height(height)
        .build();
    window.set_application(app);

    let menu = attach_context_menu(
        &drawing_area,
        ImageAction::viewer_menu(),
        Rc::new({
            let window = window.downgrade();
            let image = image.clone();
            let config = config.clone();
            move |action: ImageAction| {
                if let Some(window) = window.upgrade() {
                    run_action(&window, &image, &config, action);
                }
            }
        }),
    );
    window.connect_close_request(move |_| {
        menu.unparent();
        glib::Propagation::Proceed
    });

    debug!("Opening full view for {}x{} image", image.width(), image.height());

    let key = gtk::EventControllerKey::new();
    key.connect_key_pressed({
        let window = window.downgrade();
        move |_, keyval, _, modifiers| {
            let Some(window) = window.upgrade() else {
                return glib::Propagation::Proceed;
            };
            let action = match config.shortcuts.get_action(keyval, modifiers) {
                Some(action) => action,
                None => return glib::Propagation::Proceed,
            };
            match action {
                Action::Copy => run_action(&window, &image, &config, ImageAction::Copy),
                Action::Save => run_action(&window, &image, &config, ImageAction::Save),
                Action::Cancel => window.close(),
                Action::StartCapture => return glib::Propagation::Proceed,
            }
            glib::Propagation::Stop
        }
    });
    window.add_controller(key);

    window.present();
    window
}

fn run_action(window: &gtk::Window, image: &Rc<RgbaImage>, config: &AppConfig, action: ImageAction) {
    match action {
        ImageAction::Copy => {
            if let Err(e) = ClipboardManager::from_widget(window).copy_image(image) {
                error!("{}", e);
            }
        }
        ImageAction::Save => prompt_save(window, image.clone(), &config.default_file_name),
        ImageAction::Delete | ImageAction::View => {}
    }
}
