//! Saving captured images to disk
//!
//! The save dialog offers PNG, JPEG and Bitmap filters. A filter the user
//! switched to decides the encoder and the extension is rewritten to match.
//! Otherwise the extension of the picked path decides, defaulting to PNG.

use gtk::gio;
use gtk::glib;
use gtk4 as gtk;
use gtk4::prelude::*;
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
}

impl SaveFormat {
    /// Filter order shown in the dialog
    pub fn all() -> &'static [SaveFormat] {
        &[SaveFormat::Png, SaveFormat::Jpeg, SaveFormat::Bmp]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaveFormat::Png => "PNG Image",
            SaveFormat::Jpeg => "JPEG Image",
            SaveFormat::Bmp => "Bitmap Image",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Bmp => "bmp",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Jpeg => ImageFormat::Jpeg,
            SaveFormat::Bmp => ImageFormat::Bmp,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|format| format.label() == label)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum SaveError {
    EmptyImage,
    Encode { path: PathBuf, message: String },
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::EmptyImage => write!(f, "Cannot save an empty image"),
            SaveError::Encode { path, message } => {
                write!(f, "Failed to save {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for SaveError {}

/// Pick the file and encoder for a chosen path.
///
/// `selected` is the filter the user switched to, if any. It wins over the
/// extension. Without it, unknown extensions become `.png`.
pub fn resolve_target(path: PathBuf, selected: Option<SaveFormat>) -> (PathBuf, SaveFormat) {
    let current = SaveFormat::from_path(&path);
    match (selected, current) {
        (Some(format), Some(current)) if format == current => (path, format),
        (Some(format), Some(_)) => (path.with_extension(format.extension()), format),
        (Some(format), None) => (append_extension(path, format), format),
        (None, Some(format)) => (path, format),
        (None, None) => (append_extension(path, SaveFormat::Png), SaveFormat::Png),
    }
}

fn append_extension(path: PathBuf, format: SaveFormat) -> PathBuf {
    let mut name = path.into_os_string();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

pub fn save_image(image: &RgbaImage, path: &Path, format: SaveFormat) -> Result<(), SaveError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(SaveError::EmptyImage);
    }

    let encode_err = |e: image::ImageError| SaveError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    match format {
        // JPEG has no alpha channel
        SaveFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .save_with_format(path, format.image_format())
            .map_err(encode_err)?,
        _ => image
            .save_with_format(path, format.image_format())
            .map_err(encode_err)?,
    }

    info!("Image saved to {:?} as {}", path, format.label());
    Ok(())
}

fn file_filters() -> (gio::ListStore, gtk::FileFilter) {
    let store = gio::ListStore::new::<gtk::FileFilter>();
    let filters: Vec<gtk::FileFilter> = SaveFormat::all()
        .iter()
        .map(|format| {
            let filter = gtk::FileFilter::new();
            filter.set_name(Some(format.label()));
            filter.add_pattern(&format!("*.{}", format.extension()));
            if *format == SaveFormat::Jpeg {
                filter.add_pattern("*.jpeg");
            }
            store.append(&filter);
            filter
        })
        .collect();

    // PNG is listed first and preselected
    let png = filters
        .into_iter()
        .next()
        .unwrap_or_else(gtk::FileFilter::new);
    (store, png)
}

/// Ask for a destination and write `image` there. Dismissing the dialog is a
/// no-op.
pub fn prompt_save(parent: &impl IsA<gtk::Window>, image: Rc<RgbaImage>, initial_name: &str) {
    let (filters, default_filter) = file_filters();
    let dialog = gtk::FileDialog::builder()
        .title("Save an Image File")
        .initial_name(initial_name)
        .filters(&filters)
        .default_filter(&default_filter)
        .modal(true)
        .build();

    let parent = parent.clone().upcast::<gtk::Window>();
    glib::spawn_future_local(async move {
        let file = match dialog.save_future(Some(&parent)).await {
            Ok(file) => file,
            Err(e) => {
                debug!("Save dialog dismissed: {}", e);
                return;
            }
        };

        let Some(path) = file.path() else {
            error!("Selected file has no local path");
            return;
        };

        // the dialog reports the active filter through its default filter
        let selected = dialog
            .default_filter()
            .filter(|filter| filter != &default_filter)
            .and_then(|filter| filter.name())
            .and_then(|name| SaveFormat::from_label(&name));

        let (path, format) = resolve_target(path, selected);
        if let Err(e) = save_image(&image, &path, format) {
            error!("{}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 13 % 256) as u8, (y * 29 % 256) as u8, ((x + y) % 256) as u8, 255])
        })
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SaveFormat::from_path(Path::new("a.png")), Some(SaveFormat::Png));
        assert_eq!(SaveFormat::from_path(Path::new("a.JPG")), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_path(Path::new("a.jpeg")), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_path(Path::new("dir/a.bmp")), Some(SaveFormat::Bmp));
        assert_eq!(SaveFormat::from_path(Path::new("a.gif")), None);
        assert_eq!(SaveFormat::from_path(Path::new("image")), None);
    }

    #[test]
    fn test_resolve_target_defaults_to_png() {
        let (path, format) = resolve_target(PathBuf::from("/tmp/shot"), None);
        assert_eq!(path, PathBuf::from("/tmp/shot.png"));
        assert_eq!(format, SaveFormat::Png);

        let (path, format) = resolve_target(PathBuf::from("/tmp/shot.tiff"), None);
        assert_eq!(path, PathBuf::from("/tmp/shot.tiff.png"));
        assert_eq!(format, SaveFormat::Png);

        let (path, format) = resolve_target(PathBuf::from("/tmp/shot.bmp"), None);
        assert_eq!(path, PathBuf::from("/tmp/shot.bmp"));
        assert_eq!(format, SaveFormat::Bmp);
    }

    #[test]
    fn test_selected_filter_overrides_extension() {
        let (path, format) = resolve_target(PathBuf::from("/tmp/image.png"), Some(SaveFormat::Jpeg));
        assert_eq!(path, PathBuf::from("/tmp/image.jpg"));
        assert_eq!(format, SaveFormat::Jpeg);

        let (path, format) = resolve_target(PathBuf::from("/tmp/shot"), Some(SaveFormat::Bmp));
        assert_eq!(path, PathBuf::from("/tmp/shot.bmp"));
        assert_eq!(format, SaveFormat::Bmp);

        let (path, format) = resolve_target(PathBuf::from("/tmp/shot.jpeg"), Some(SaveFormat::Jpeg));
        assert_eq!(path, PathBuf::from("/tmp/shot.jpeg"));
        assert_eq!(format, SaveFormat::Jpeg);
    }

    #[test]
    fn test_format_from_filter_label() {
        for format in SaveFormat::all() {
            assert_eq!(SaveFormat::from_label(format.label()), Some(*format));
        }
        assert_eq!(SaveFormat::from_label("GIF Image"), None);
    }

    #[test]
    fn test_png_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.png");
        let source = gradient(37, 21);

        save_image(&source, &path, SaveFormat::Png).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, source);
    }

    #[test]
    fn test_png_keeps_transparency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        let source = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 40]));

        save_image(&source, &path, SaveFormat::Png).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgba8(), source);
    }

    #[test]
    fn test_bmp_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.bmp");
        let source = gradient(16, 9);

        save_image(&source, &path, SaveFormat::Bmp).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, source);
    }

    #[test]
    fn test_jpeg_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.jpg");
        let source = gradient(64, 48);

        save_image(&source, &path, SaveFormat::Jpeg).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (64, 48));
        assert_eq!(
            image::ImageFormat::from_path(&path).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("capture.png");
        let err = save_image(&gradient(2, 2), &path, SaveFormat::Png).unwrap_err();
        assert!(matches!(err, SaveError::Encode { .. }));
    }

    #[test]
    fn test_save_empty_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let err = save_image(&RgbaImage::new(0, 0), &path, SaveFormat::Png).unwrap_err();
        assert!(matches!(err, SaveError::EmptyImage));
        assert!(!path.exists());
    }
}
