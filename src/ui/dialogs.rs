use gtk4 as gtk;

use gtk::{gdk, Orientation};
use gtk4::prelude::*;
use log::warn;
use std::rc::Rc;

use crate::actions::ImageAction;

/// Modal error message; the application keeps running after it is dismissed
pub fn show_error(parent: Option<&gtk::Window>, message: &str) {
    warn!("{}", message);

    let dialog = gtk::AlertDialog::builder()
        .message("Error")
        .detail(message)
        .buttons(["OK"])
        .modal(true)
        .build();
    dialog.show(parent);
}

/// Attach a right-click popover menu listing `actions` to `widget`.
///
/// The returned popover is parented to `widget` and must be unparented before
/// the widget is dropped.
pub fn attach_context_menu(
    widget: &impl IsA<gtk::Widget>,
    actions: &[ImageAction],
    on_action: Rc<dyn Fn(ImageAction)>,
) -> gtk::Popover {
    let menu_box = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(2)
        .margin_top(4)
        .margin_bottom(4)
        .margin_start(4)
        .margin_end(4)
        .build();

    let popover = gtk::Popover::builder()
        .child(&menu_box)
        .has_arrow(false)
        .autohide(true)
        .build();
    popover.add_css_class("menu");
    popover.set_parent(widget);

    for &action in actions {
        let content = gtk::Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(8)
            .build();
        content.append(&gtk::Image::from_icon_name(action.icon_name()));
        content.append(
            &gtk::Label::builder()
                .label(action.label())
                .halign(gtk::Align::Start)
                .build(),
        );

        let item = gtk::Button::builder().child(&content).build();
        item.add_css_class("flat");
        // the popover owns this button; a strong capture would keep it alive
        // after it is unparented
        item.connect_clicked({
            let popover = popover.downgrade();
            let on_action = on_action.clone();
            move |_| {
                if let Some(popover) = popover.upgrade() {
                    popover.popdown();
                }
                on_action(action);
            }
        });
        menu_box.append(&item);
    }

    let click = gtk::GestureClick::new();
    click.set_button(gdk::BUTTON_SECONDARY);
    click.connect_pressed({
        let popover = popover.downgrade();
        move |_, _, x, y| {
            let Some(popover) = popover.upgrade() else {
                return;
            };
            let rect = gdk::Rectangle::new(x as i32, y as i32, 1, 1);
            popover.set_pointing_to(Some(&rect));
            popover.popup();
        }
    });
    widget.add_controller(click);

    popover
}
