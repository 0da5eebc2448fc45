pub mod model;
pub mod view;

pub use model::Photo;
pub use view::{draw_photo, draw_thumbnail};

pub const THUMBNAIL_SIZE: i32 = 220;
pub const PHOTO_SIZE: i32 = 1600;
pub const TILE_RADIUS: f64 = 16.0;
pub const LIGHTBOX_WIDTH: i32 = 760;
pub const LIGHTBOX_HEIGHT: i32 = 560;
