use gtk4 as gtk;

use gtk::gdk_pixbuf::{Colorspace, Pixbuf};
use gtk4::prelude::*;
use image::RgbaImage;

use crate::app::{AppConfig, CaptureRegion};

/// Convert an RGBA raster to a GDK Pixbuf
pub fn image_to_pixbuf(image: &RgbaImage) -> Pixbuf {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let stride = width * 4; // RGBA = 4 bytes per pixel

    let bytes = gtk::glib::Bytes::from(image.as_raw());

    Pixbuf::from_bytes(&bytes, Colorspace::Rgb, true, 8, width, height, stride)
}

/// Scale and offset that fit an image inside an area, preserving aspect
/// ratio and centering it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

pub fn fit_to_area(img_width: f64, img_height: f64, area_width: f64, area_height: f64) -> FitTransform {
    if img_width <= 0.0 || img_height <= 0.0 {
        return FitTransform {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
    }

    let scale_x = area_width / img_width;
    let scale_y = area_height / img_height;
    let scale = scale_x.min(scale_y);

    FitTransform {
        scale,
        offset_x: (area_width - img_width * scale) / 2.0,
        offset_y: (area_height - img_height * scale) / 2.0,
    }
}

/// Paint `pixbuf` scaled to fit the area on a dark background
pub fn draw_image_fit(cr: &gtk::cairo::Context, pixbuf: &Pixbuf, width: i32, height: i32) {
    cr.set_source_rgb(0.14, 0.14, 0.14);
    let _ = cr.paint();

    let fit = fit_to_area(
        pixbuf.width() as f64,
        pixbuf.height() as f64,
        width as f64,
        height as f64,
    );

    let _ = cr.save();
    cr.translate(fit.offset_x, fit.offset_y);
    cr.scale(fit.scale, fit.scale);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    let _ = cr.paint();
    let _ = cr.restore();
}

/// Overlay background plus the outline of the rectangle being dragged
pub fn draw_selection(cr: &gtk::cairo::Context, region: Option<CaptureRegion>, config: &AppConfig) {
    cr.set_source_rgb(1.0, 1.0, 1.0);
    let _ = cr.paint();

    if let Some(rect) = region {
        let (r, g, b) = config.outline_rgb;
        cr.set_source_rgb(r, g, b);
        cr.set_line_width(config.outline_width);
        cr.rectangle(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        let _ = cr.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_image_letterboxes() {
        let fit = fit_to_area(400.0, 100.0, 200.0, 150.0);
        assert_eq!(fit.scale, 0.5);
        assert_eq!(fit.offset_x, 0.0);
        assert_eq!(fit.offset_y, 50.0);
    }

    #[test]
    fn test_fit_tall_image_pillarboxes() {
        let fit = fit_to_area(100.0, 300.0, 700.0, 600.0);
        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.offset_x, 250.0);
        assert_eq!(fit.offset_y, 0.0);
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let fit = fit_to_area(200.0, 150.0, 700.0, 700.0);
        let drawn_w = 200.0 * fit.scale;
        let drawn_h = 150.0 * fit.scale;
        assert!((drawn_w / drawn_h - 200.0 / 150.0).abs() < 1e-9);
        assert!(drawn_w <= 700.0 && drawn_h <= 700.0);
    }

    #[test]
    fn test_fit_empty_image() {
        let fit = fit_to_area(0.0, 0.0, 100.0, 100.0);
        assert_eq!(fit.scale, 1.0);
    }
}
