use crate::{
    core::geo::MapBounds,
    data::document::ImageRef,
    layers::base::{Layer, LayerKind, LayerProperties},
};

/// The base image overlay spanning the map bounds
pub struct ImageOverlay {
    properties: LayerProperties,
    image: ImageRef,
    bounds: MapBounds,
}

impl ImageOverlay {
    pub fn new(id: String, image: ImageRef, bounds: MapBounds) -> Self {
        let properties = LayerProperties::new(id, LayerKind::Image);
        Self {
            properties,
            image,
            bounds,
        }
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }
}

impl Layer for ImageOverlay {
    fn id(&self) -> &str {
        &self.properties.id
    }

    fn kind(&self) -> LayerKind {
        self.properties.kind
    }

    fn z_index(&self) -> i32 {
        self.properties.z_index
    }

    fn bounds(&self) -> Option<MapBounds> {
        Some(self.bounds)
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "url": self.image.as_str(),
            "bounds": {
                "min": [self.bounds.min.x, self.bounds.min.y],
                "max": [self.bounds.max.x, self.bounds.max.y],
            },
            "interactive": self.properties.interactive,
        })
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
