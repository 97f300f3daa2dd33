use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::gio;
use gtk::{Align, Orientation};

use crate::app::{Action, AppConfig};

pub struct LauncherComponents {
    pub window: adw::ApplicationWindow,
    pub capture_btn: gtk::Button,
}

pub fn create_launcher(app: &adw::Application, config: &AppConfig) -> LauncherComponents {
    let capture_label = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(6)
        .valign(Align::Center)
        .build();
    capture_label.append(
        &gtk::Image::builder()
            .icon_name("camera-photo-symbolic")
            .pixel_size(32)
            .build(),
    );
    capture_label.append(&gtk::Label::new(Some(Action::StartCapture.label())));

    let capture_btn = gtk::Button::builder()
        .child(&capture_label)
        .width_request(200)
        .height_request(100)
        .halign(Align::Center)
        .valign(Align::Center)
        .vexpand(true)
        .tooltip_text(format!(
            "{} ({})",
            Action::StartCapture.label(),
            config.shortcuts.get_shortcut_label(Action::StartCapture)
        ))
        .build();
    capture_btn.add_css_class("suggested-action");
    capture_btn.add_css_class("pill");

    let menu = gio::Menu::new();
    menu.append(Some("Show Captured Images"), Some("app.gallery"));
    menu.append(Some("Keyboard Shortcuts"), Some("app.shortcuts"));
    let menu_btn = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu)
        .build();

    let header_bar = adw::HeaderBar::new();
    header_bar.pack_end(&menu_btn);

    let content = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .build();
    content.append(&header_bar);
    content.append(&capture_btn);

    let (width, height) = config.launcher_size;
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Screen Capture Tool")
        .content(&content)
        .default_width(width)
        .default_height(height)
        .build();

    LauncherComponents {
        window,
        capture_btn,
    }
}
