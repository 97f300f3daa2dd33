use adw::prelude::*;
use gtk4 as gtk;
use libadwaita as adw;

use crate::app::{Action, AppConfig};

pub fn show_shortcuts_dialog(config: &AppConfig, parent: &impl IsA<gtk::Window>) {
    let window = adw::PreferencesWindow::builder()
        .transient_for(parent)
        .modal(true)
        .title("Keyboard Shortcuts")
        .default_width(500)
        .default_height(400)
        .search_enabled(false)
        .build();

    let page = adw::PreferencesPage::new();
    window.add(&page);

    let group_capture = adw::PreferencesGroup::builder().title("Capture").build();
    add_action_row(config, &group_capture, Action::StartCapture);
    add_action_row(config, &group_capture, Action::Cancel);
    page.add(&group_capture);

    let group_viewer = adw::PreferencesGroup::builder()
        .title("Image Viewer")
        .build();
    add_action_row(config, &group_viewer, Action::Copy);
    add_action_row(config, &group_viewer, Action::Save);
    page.add(&group_viewer);

    window.present();
}

fn add_action_row(config: &AppConfig, group: &adw::PreferencesGroup, action: Action) {
    let shortcut_label = config.shortcuts.get_shortcut_label(action);

    let row = adw::ActionRow::builder().title(action.label()).build();

    let shortcut = gtk::Label::builder()
        .label(&shortcut_label)
        .valign(gtk::Align::Center)
        .css_classes(["dim-label"])
        .build();

    if shortcut_label.is_empty() {
        shortcut.set_label("Disabled");
    }

    row.add_suffix(&shortcut);
    group.add(&row);
}
