use crate::gui::gallery::{PHOTO_SIZE, THUMBNAIL_SIZE};
use cupid::gallery::{Gallery, ImageRef};
use gdk_pixbuf::Pixbuf;
use std::path::Path;

#[derive(Clone)]
pub struct Photo {
    pub source: ImageRef,
    pub thumbnail: Option<Pixbuf>,
    pub full: Option<Pixbuf>,
}

impl Photo {
    pub fn load(source: ImageRef) -> Self {
        let path = Path::new(source.as_str());
        let full = Pixbuf::from_file_at_scale(path, PHOTO_SIZE, PHOTO_SIZE, true)
            .map_err(|e| log::warn!("Failed to load photo {}: {}", source, e))
            .ok();
        let thumbnail = full.as_ref().and_then(|pixbuf| {
            let scale = THUMBNAIL_SIZE as f64 / pixbuf.width().min(pixbuf.height()).max(1) as f64;
            pixbuf.scale_simple(
                ((pixbuf.width() as f64 * scale).round() as i32).max(1),
                ((pixbuf.height() as f64 * scale).round() as i32).max(1),
                gdk_pixbuf::InterpType::Bilinear,
            )
        });
        Self {
            source,
            thumbnail,
            full,
        }
    }

    pub fn load_all(gallery: &Gallery) -> Vec<Self> {
        gallery.images().iter().cloned().map(Self::load).collect()
    }
}
