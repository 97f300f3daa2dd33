use gtk4 as gtk;
use libadwaita as adw;

use gtk::{gdk, Align, DrawingArea};
use gtk4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::app::{AppConfig, CaptureSession};
use crate::ui::drawing::draw_selection;

/// Translucent full-screen window the selection is dragged on
#[derive(Clone)]
pub struct OverlayComponents {
    pub window: gtk::Window,
    pub container: gtk::Overlay,
    pub drawing_area: DrawingArea,
    pub cancel_btn: gtk::Button,
    /// Screen position of the monitor the overlay covers
    pub origin: Rc<Cell<(i32, i32)>>,
}

pub fn create_overlay(
    app: &adw::Application,
    state: &Rc<RefCell<CaptureSession>>,
    config: &Rc<AppConfig>,
) -> OverlayComponents {
    let drawing_area = DrawingArea::builder().hexpand(true).vexpand(true).build();
    drawing_area.set_cursor_from_name(Some("crosshair"));
    drawing_area.set_draw_func({
        let state = state.clone();
        let config = config.clone();
        move |_, cr, _, _| {
            let region = state.borrow().active_region();
            draw_selection(cr, region, &config);
        }
    });

    let cancel_btn = gtk::Button::builder()
        .label("Cancel")
        .width_request(300)
        .height_request(50)
        .halign(Align::Center)
        .valign(Align::Start)
        .margin_top(10)
        .visible(false)
        .build();
    cancel_btn.add_css_class("destructive-action");
    cancel_btn.set_cursor_from_name(Some("default"));

    let container = gtk::Overlay::builder().child(&drawing_area).build();
    container.add_overlay(&cancel_btn);

    let window = gtk::Window::builder()
        .application(app)
        .title("Select Region")
        .decorated(false)
        .child(&container)
        .opacity(config.overlay_opacity)
        .build();

    OverlayComponents {
        window,
        container,
        drawing_area,
        cancel_btn,
        origin: Rc::new(Cell::new((0, 0))),
    }
}

impl OverlayComponents {
    /// Cover the first monitor and remember where it sits on the screen
    pub fn present_fullscreen(&self) {
        let monitor = gdk::Display::default()
            .and_then(|display| display.monitors().item(0))
            .and_downcast::<gdk::Monitor>();

        match monitor {
            Some(monitor) => {
                let geometry = monitor.geometry();
                self.origin.set((geometry.x(), geometry.y()));
                self.window.fullscreen_on_monitor(&monitor);
            }
            None => {
                self.origin.set((0, 0));
                self.window.fullscreen();
            }
        }

        self.window.present();
        self.drawing_area.queue_draw();
    }

    pub fn hide(&self) {
        self.cancel_btn.set_visible(false);
        self.window.unfullscreen();
        self.window.set_visible(false);
    }
}
