//! # annomap
//!
//! A data-driven, annotated image map core inspired by Leaflet.
//!
//! The crate turns a declarative JSON map document (base image, bounds,
//! categorized markers, popups) into an attached set of renderable layers,
//! and replaces the host engine's discrete wheel zoom with a continuous,
//! interruptible smooth zoom anchored at the pointer.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod traits;
pub mod ui;

// Re-export public API
pub use crate::core::{
    geo::{MapBounds, MapPoint, Point},
    map::Map,
    viewport::{Transform, Viewport},
};

pub use crate::layers::{
    base::Layer, builder::LayerBuilder, icon::Icon, image::ImageOverlay, marker::MarkerLayer,
};

pub use crate::data::document::{Category, MapDocument, Marker};

pub use crate::input::{events::InputEvent, smooth_zoom::SmoothZoom};

pub use crate::traits::MapHost;

pub use crate::ui::popup::Popup;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = MapError;
