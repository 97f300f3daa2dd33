//! Per-image actions offered by the gallery and the full-view window

pub mod clipboard;
pub mod export;

pub use clipboard::ClipboardManager;
pub use export::prompt_save;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    Copy,
    Save,
    Delete,
    View,
}

impl ImageAction {
    pub fn label(&self) -> &'static str {
        match self {
            ImageAction::Copy => "Copy to Clipboard",
            ImageAction::Save => "Save Image",
            ImageAction::Delete => "Delete Image",
            ImageAction::View => "View Image in Full",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            ImageAction::Copy => "edit-copy-symbolic",
            ImageAction::Save => "document-save-symbolic",
            ImageAction::Delete => "user-trash-symbolic",
            ImageAction::View => "zoom-fit-best-symbolic",
        }
    }

    /// Menu offered on a gallery thumbnail
    pub fn gallery_menu() -> &'static [ImageAction] {
        &[
            ImageAction::Copy,
            ImageAction::Save,
            ImageAction::Delete,
            ImageAction::View,
        ]
    }

    /// Menu offered in the full-view window
    pub fn viewer_menu() -> &'static [ImageAction] {
        &[ImageAction::Copy, ImageAction::Save]
    }
}
