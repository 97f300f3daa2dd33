//! Gallery entries
//!
//! The model owns each captured raster together with the handle of the widget
//! that displays it, so the two can only be added and removed as a pair. The
//! handle type is generic to keep the bookkeeping testable without a display.

use image::RgbaImage;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

#[derive(Debug)]
pub struct GalleryEntry<H> {
    pub id: EntryId,
    pub image: Rc<RgbaImage>,
    pub thumbnail: H,
}

#[derive(Debug)]
pub struct GalleryModel<H> {
    entries: Vec<GalleryEntry<H>>,
    next_id: u64,
}

impl<H> Default for GalleryModel<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<H> GalleryModel<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a copy of `image` and the thumbnail built for it.
    ///
    /// `build` receives the new entry's id and the stored copy; whatever it
    /// returns is owned by the entry until [`GalleryModel::remove`].
    pub fn add<F>(&mut self, image: &RgbaImage, build: F) -> EntryId
    where
        F: FnOnce(EntryId, &Rc<RgbaImage>) -> H,
    {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        let image = Rc::new(image.clone());
        let thumbnail = build(id, &image);
        self.entries.push(GalleryEntry {
            id,
            image,
            thumbnail,
        });
        id
    }

    /// Detach an entry; the caller disposes of the returned thumbnail
    pub fn remove(&mut self, id: EntryId) -> Option<GalleryEntry<H>> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    #[cfg(test)]
    pub fn get(&self, id: EntryId) -> Option<&GalleryEntry<H>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries in display order
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &GalleryEntry<H>> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn test_add_then_remove_restores_count() {
        let mut model: GalleryModel<String> = GalleryModel::new();
        model.add(&solid(4, 4, 1), |_, _| "first".to_string());
        let before = model.len();

        let id = model.add(&solid(4, 4, 2), |_, _| "second".to_string());
        assert_eq!(model.len(), before + 1);

        let removed = model.remove(id).expect("entry should exist");
        assert_eq!(removed.thumbnail, "second");
        assert_eq!(model.len(), before);
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut model: GalleryModel<u8> = GalleryModel::new();
        for value in 0..5u8 {
            model.add(&solid(2, 2, value), |_, _| value);
        }
        let order: Vec<u8> = model.iter().map(|entry| entry.thumbnail).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);

        let middle = model.iter().nth(2).map(|entry| entry.id).unwrap();
        model.remove(middle);
        let order: Vec<u8> = model.iter().map(|entry| entry.thumbnail).collect();
        assert_eq!(order, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_stored_image_is_a_copy() {
        let mut model: GalleryModel<()> = GalleryModel::new();
        let mut source = solid(3, 3, 10);
        let id = model.add(&source, |_, _| ());

        source.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let stored = &model.get(id).unwrap().image;
        assert_eq!(*stored.get_pixel(0, 0), Rgba([10, 10, 10, 255]));
    }

    #[test]
    fn test_builder_sees_entry_id_and_stored_image() {
        let mut model: GalleryModel<(EntryId, u32)> = GalleryModel::new();
        let id = model.add(&solid(7, 5, 0), |id, image| (id, image.width()));
        assert_eq!(model.get(id).unwrap().thumbnail, (id, 7));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut model: GalleryModel<()> = GalleryModel::new();
        let first = model.add(&solid(1, 1, 0), |_, _| ());
        model.remove(first);
        let second = model.add(&solid(1, 1, 0), |_, _| ());
        assert_ne!(first, second);
    }

    #[test]
    fn test_removed_entry_releases_its_image() {
        // thumbnails hold the image in their menu callbacks, as the gallery does
        let mut model: GalleryModel<Rc<dyn Fn() -> u32>> = GalleryModel::new();
        let id = model.add(&solid(8, 8, 3), |_, image| {
            let image = image.clone();
            let menu_callback: Rc<dyn Fn() -> u32> = Rc::new(move || image.width());
            menu_callback
        });

        let entry = model.get(id).unwrap();
        let weak = Rc::downgrade(&entry.image);
        assert_eq!((entry.thumbnail)(), 8);
        assert_eq!(Rc::strong_count(&entry.image), 2);

        let removed = model.remove(id).unwrap();
        drop(removed);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_shared_image_outlives_removed_entry() {
        let mut model: GalleryModel<()> = GalleryModel::new();
        let id = model.add(&solid(2, 2, 9), |_, _| ());
        let viewer = model.get(id).unwrap().image.clone();

        drop(model.remove(id));
        assert_eq!(Rc::strong_count(&viewer), 1);
        assert_eq!(*viewer.get_pixel(1, 1), Rgba([9, 9, 9, 255]));

        let weak = Rc::downgrade(&viewer);
        drop(viewer);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_remove_unknown_entry() {
        let mut model: GalleryModel<()> = GalleryModel::new();
        let id = model.add(&solid(1, 1, 0), |_, _| ());
        assert!(model.remove(id).is_some());
        assert!(model.remove(id).is_none());
        assert!(model.is_empty());
    }
}
