use gtk4::gdk::Texture;
use gtk4::prelude::*;
use image::RgbaImage;
use log::info;

use crate::ui::drawing::image_to_pixbuf;

pub type ClipboardResult<T> = Result<T, ClipboardError>;

#[derive(Debug, PartialEq, Eq)]
pub enum ClipboardError {
    EmptyImage,
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::EmptyImage => write!(f, "Cannot copy an empty image"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Build the texture handed to the clipboard; it owns its own copy of the pixels
pub fn image_to_texture(image: &RgbaImage) -> ClipboardResult<Texture> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ClipboardError::EmptyImage);
    }
    Ok(Texture::for_pixbuf(&image_to_pixbuf(image)))
}

pub fn copy_image_to_clipboard(
    image: &RgbaImage,
    display: &gtk4::gdk::Display,
) -> ClipboardResult<()> {
    let texture = image_to_texture(image)?;
    display.clipboard().set_texture(&texture);
    info!("Copied {}x{} image to clipboard", image.width(), image.height());
    Ok(())
}

pub struct ClipboardManager {
    display: gtk4::gdk::Display,
}

impl ClipboardManager {
    pub fn from_widget(widget: &impl IsA<gtk4::Widget>) -> Self {
        Self {
            display: widget.display(),
        }
    }

    pub fn copy_image(&self, image: &RgbaImage) -> ClipboardResult<()> {
        copy_image_to_clipboard(image, &self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::with_gtk;
    use gtk4::gdk;
    use image::Rgba;

    fn gradient(width: u32, height: u32, alpha: impl Fn(u32, u32) -> u8) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 17 % 256) as u8, (y * 31 % 256) as u8, ((x ^ y) % 256) as u8, alpha(x, y)])
        })
    }

    fn rows(bytes: &[u8], stride: usize, width: u32, height: u32) -> Vec<u8> {
        let row_len = width as usize * 4;
        (0..height as usize)
            .flat_map(|row| bytes[row * stride..row * stride + row_len].iter().copied())
            .collect()
    }

    #[test]
    fn test_pixbuf_carries_exact_pixels() {
        let image = gradient(23, 11, |x, y| ((x * 7 + y * 3) % 256) as u8);
        let pixbuf = image_to_pixbuf(&image);

        assert_eq!((pixbuf.width(), pixbuf.height()), (23, 11));
        assert_eq!(pixbuf.rowstride(), 23 * 4);
        assert!(pixbuf.has_alpha());
        assert_eq!(&pixbuf.read_pixel_bytes()[..], image.as_raw().as_slice());
    }

    #[test]
    fn test_clipboard_texture_round_trip() {
        let image = gradient(29, 13, |_, _| 255);
        let expected = image.as_raw().clone();

        let downloaded = with_gtk(move || {
            let texture = image_to_texture(&image).ok()?;
            let mut downloader = gdk::TextureDownloader::new(&texture);
            downloader.set_format(gdk::MemoryFormat::R8G8B8A8);
            let (bytes, stride) = downloader.download_bytes();
            Some((
                (texture.width(), texture.height()),
                rows(&bytes, stride, image.width(), image.height()),
            ))
        });

        let Some(downloaded) = downloaded else {
            eprintln!("Skipping clipboard test: no display available");
            return;
        };
        let (size, pixels) = downloaded.expect("texture should be built");
        assert_eq!(size, (29, 13));
        assert_eq!(pixels, expected);
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let image = RgbaImage::new(0, 10);
        assert_eq!(image_to_texture(&image).err(), Some(ClipboardError::EmptyImage));
    }
}
