pub mod drawer;
pub mod pixmap;
#[cfg(test)]
pub mod recording;
pub mod surface;

pub use drawer::LandscapeDrawer;
pub use pixmap::PixmapSurface;
pub use surface::{Fill, Rect, Surface};
