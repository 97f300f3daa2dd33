use gtk::glib;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::Orientation;
use image::RgbaImage;
use log::{debug, error, info};
use std::cell::RefCell;
use std::rc::Rc;

use crate::actions::{prompt_save, ClipboardManager, ImageAction};
use crate::app::AppConfig;
use crate::ui::dialogs::attach_context_menu;
use crate::ui::drawing::image_to_pixbuf;
use crate::ui::viewer::show_full_view;

use super::model::{EntryId, GalleryModel};

/// The widgets displaying one gallery entry
pub struct Thumbnail {
    child: gtk::FlowBoxChild,
    menu: gtk::Popover,
}

impl Thumbnail {
    fn dispose(self, flow_box: &gtk::FlowBox) {
        self.menu.unparent();
        flow_box.remove(&self.child);
    }
}

/// "Captured Images" window: a wrapping, scrollable grid of thumbnails
pub struct Gallery {
    pub window: adw::ApplicationWindow,
    flow_box: gtk::FlowBox,
    scrolled_window: gtk::ScrolledWindow,
    placeholder: adw::StatusPage,
    model: RefCell<GalleryModel<Thumbnail>>,
    config: Rc<AppConfig>,
}

impl Gallery {
    pub fn new(app: &adw::Application, config: Rc<AppConfig>) -> Rc<Self> {
        let flow_box = gtk::FlowBox::builder()
            .orientation(Orientation::Horizontal)
            .selection_mode(gtk::SelectionMode::None)
            .valign(gtk::Align::Start)
            .max_children_per_line(64)
            .homogeneous(false)
            .build();

        let scrolled_window = gtk::ScrolledWindow::builder()
            .child(&flow_box)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .vexpand(true)
            .build();

        let placeholder = adw::StatusPage::builder()
            .icon_name("image-x-generic-symbolic")
            .title("No Captures Yet")
            .description("Use Start Capture to grab a region of the screen")
            .vexpand(true)
            .build();

        let content = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .build();
        content.append(&adw::HeaderBar::new());
        content.append(&placeholder);
        content.append(&scrolled_window);

        let (width, height) = config.gallery_size;
        let window = adw::ApplicationWindow::builder()
            .application(app)
            .title("Captured Images")
            .content(&content)
            .default_width(width)
            .default_height(height)
            .hide_on_close(true)
            .build();

        let gallery = Rc::new(Self {
            window,
            flow_box,
            scrolled_window,
            placeholder,
            model: RefCell::new(GalleryModel::new()),
            config,
        });
        gallery.update_placeholder();
        gallery
    }

    pub fn len(&self) -> usize {
        self.model.borrow().len()
    }

    /// Store a copy of `image` and show it as a new thumbnail at the end
    pub fn add(self: &Rc<Self>, image: &RgbaImage) -> EntryId {
        let id = self
            .model
            .borrow_mut()
            .add(image, |id, stored| self.build_thumbnail(id, stored));

        self.update_placeholder();
        // closing only hides the window; bring it back for every new capture
        self.window.present();

        info!("Gallery entry {:?} added ({} total)", id, self.len());
        id
    }

    /// Drop an entry together with its thumbnail
    pub fn remove(&self, id: EntryId) {
        let removed = self.model.borrow_mut().remove(id);
        match removed {
            Some(entry) => {
                entry.thumbnail.dispose(&self.flow_box);
                info!("Gallery entry {:?} removed ({} left)", id, self.len());
            }
            None => debug!("Gallery entry {:?} already removed", id),
        }
        self.update_placeholder();
    }

    fn update_placeholder(&self) {
        let empty = self.model.borrow().is_empty();
        self.placeholder.set_visible(empty);
        self.scrolled_window.set_visible(!empty);
    }

    fn build_thumbnail(self: &Rc<Self>, id: EntryId, image: &Rc<RgbaImage>) -> Thumbnail {
        let texture = gtk::gdk::Texture::for_pixbuf(&image_to_pixbuf(image));
        let picture = gtk::Picture::builder()
            .paintable(&texture)
            .content_fit(gtk::ContentFit::Contain)
            .can_shrink(true)
            .width_request(self.config.thumbnail_width)
            .height_request(self.config.thumbnail_height)
            .tooltip_text(format!("{} × {}", image.width(), image.height()))
            .build();

        let margin = self.config.thumbnail_margin;
        let child = gtk::FlowBoxChild::builder()
            .child(&picture)
            .margin_top(margin)
            .margin_bottom(margin)
            .margin_start(margin)
            .margin_end(margin)
            .build();

        let gallery = Rc::downgrade(self);
        let image = image.clone();
        let menu = attach_context_menu(
            &picture,
            ImageAction::gallery_menu(),
            Rc::new(move |action: ImageAction| {
                if let Some(gallery) = gallery.upgrade() {
                    gallery.run_action(action, id, &image);
                }
            }),
        );

        self.flow_box.append(&child);
        Thumbnail { child, menu }
    }

    fn run_action(self: &Rc<Self>, action: ImageAction, id: EntryId, image: &Rc<RgbaImage>) {
        debug!("{:?} on gallery entry {:?}", action, id);
        match action {
            ImageAction::Copy => {
                if let Err(e) = ClipboardManager::from_widget(&self.window).copy_image(image) {
                    error!("{}", e);
                }
            }
            ImageAction::Save => {
                prompt_save(&self.window, image.clone(), &self.config.default_file_name);
            }
            ImageAction::Delete => {
                // the popover that fired this is unparented by remove()
                let gallery = self.clone();
                glib::idle_add_local_once(move || gallery.remove(id));
            }
            ImageAction::View => {
                show_full_view(
                    self.window.application().as_ref(),
                    image.clone(),
                    self.config.clone(),
                );
            }
        }
    }
}
