//! Gallery of captured images

pub mod model;
mod window;

pub use window::Gallery;
