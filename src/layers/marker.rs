use crate::{
    core::geo::{MapBounds, MapPoint, Point},
    layers::base::{Layer, LayerKind, LayerProperties},
    layers::icon::Icon,
    ui::popup::Popup,
};

/// A single marker: an icon anchored at a map coordinate, bound to a
/// lazily-built popup.
pub struct MarkerLayer {
    properties: LayerProperties,
    position: MapPoint,
    icon: Icon,
    popup: Popup,
}

impl MarkerLayer {
    pub fn new(id: String, position: MapPoint, icon: Icon, popup: Popup) -> Self {
        let properties = LayerProperties::new(id, LayerKind::Marker);
        Self {
            properties,
            position,
            icon,
            popup,
        }
    }

    pub fn position(&self) -> MapPoint {
        self.position
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut Popup {
        &mut self.popup
    }

    /// Screen offset of the icon's top-left corner from the marker's
    /// projected position (the bottom-center anchor).
    pub fn icon_offset(&self) -> Point {
        self.icon.anchor().multiply(-1.0)
    }
}

impl Layer for MarkerLayer {
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
        Some(MapBounds::new(self.position, self.position))
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": [self.position.x, self.position.y],
            "anchor": [self.icon.anchor().x, self.icon.anchor().y],
            "icon": self.icon.markup(),
        })
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
