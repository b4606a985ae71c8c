use crate::core::geo::MapBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Image,
    Marker,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Image => write!(f, "image"),
            LayerKind::Marker => write!(f, "marker"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub kind: LayerKind,
    pub z_index: i32,
    pub interactive: bool,
}

impl LayerProperties {
    pub fn new(id: String, kind: LayerKind) -> Self {
        Self {
            id,
            kind,
            // markers render above the base image
            z_index: match kind {
                LayerKind::Image => 0,
                LayerKind::Marker => 10,
            },
            interactive: true,
        }
    }
}

/// An independently attachable renderable unit (image overlay, marker)
pub trait Layer {
    fn id(&self) -> &str;

    fn kind(&self) -> LayerKind;

    fn z_index(&self) -> i32;

    /// Map-space footprint of the layer, if it has one
    fn bounds(&self) -> Option<MapBounds>;

    /// Rendering options as a JSON blob, for the host engine
    fn options(&self) -> serde_json::Value;

    fn as_any(&self) -> &dyn std::any::Any;
}
