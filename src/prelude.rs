//! Prelude module for common annomap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use annomap::prelude::*;`

pub use crate::core::{
    geo::{MapBounds, MapPoint, Point},
    map::Map,
    viewport::{Transform, Viewport},
};

pub use crate::data::document::{Category, MapDocument, Marker, PopupContent, PopupLink};

pub use crate::layers::{
    base::{Layer, LayerKind},
    builder::LayerBuilder,
    icon::Icon,
    image::ImageOverlay,
    manager::LayerManager,
    marker::MarkerLayer,
};

pub use crate::input::{
    events::InputEvent,
    smooth_zoom::{AnchorMode, SmoothZoom, SmoothZoomConfig, ZoomState},
};

pub use crate::traits::MapHost;

pub use crate::ui::popup::Popup;

pub use crate::{Error as MapError, Result};

pub use instant::{Duration, Instant};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
