pub mod base;
pub mod builder;
pub mod icon;
pub mod image;
pub mod manager;
pub mod marker;

pub use base::{Layer, LayerKind, LayerProperties};
pub use builder::LayerBuilder;
pub use icon::Icon;
pub use image::ImageOverlay;
pub use manager::LayerManager;
pub use marker::MarkerLayer;
