use crate::{
    data::document::MapDocument,
    layers::{icon::Icon, image::ImageOverlay, marker::MarkerLayer},
    traits::MapHost,
    ui::popup::Popup,
};

/// Materializes a validated [`MapDocument`] into attached layers on a host:
/// one base image overlay plus one marker (with bound popup) per entry,
/// then fits the viewport to the map bounds exactly once.
///
/// Building the same document twice yields a geometrically identical
/// layer set: same count, same per-marker position and anchor.
pub struct LayerBuilder;

impl LayerBuilder {
    /// Attaches all layers for `document` and frames the initial view.
    /// Returns the number of layers attached.
    pub fn build(document: &MapDocument, host: &mut dyn MapHost) -> crate::Result<usize> {
        let bounds = *document.map_bounds();

        host.attach_layer(Box::new(ImageOverlay::new(
            "base-image".to_string(),
            document.map_image().clone(),
            bounds,
        )))?;

        for (i, marker) in document.markers().iter().enumerate() {
            let category = document.category(&marker.category_id).ok_or_else(|| {
                crate::MapError::Validation(format!(
                    "unresolved category '{}'",
                    marker.category_id
                ))
            })?;

            let layer = MarkerLayer::new(
                format!("marker-{i}"),
                marker.position,
                Icon::for_category(category),
                Popup::new(marker.popup.clone()),
            );
            host.attach_layer(Box::new(layer))?;
        }

        // Initial framing happens once; all later zoom/pan is user-driven.
        host.set_view(&bounds);

        let count = document.markers().len() + 1;
        log::info!("attached {count} layers ({} markers)", document.markers().len());
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::Map;
    use crate::layers::base::{Layer, LayerKind};

    fn document() -> MapDocument {
        MapDocument::from_str(
            r##"{
                "mapImage": "mainland.png",
                "mapBounds": [[0, 0], [100, 100]],
                "categories": [{"id": "a", "color": "#fff"}],
                "markers": [
                    {"position": [50, 50], "categoryId": "a",
                     "popup": {"title": "t", "description": "d",
                               "link": {"url": "u", "label": "l"}}}
                ]
            }"##,
            "",
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_one_overlay_one_marker() {
        let doc = document();
        let mut map = Map::new(crate::core::geo::Point::new(512.0, 512.0));

        let count = LayerBuilder::build(&doc, &mut map).unwrap();

        assert_eq!(count, 2);
        assert_eq!(map.layers().count_of(LayerKind::Image), 1);
        assert_eq!(map.layers().count_of(LayerKind::Marker), 1);

        // Initial viewport is fit to the map bounds
        let view = map.viewport().bounds();
        assert!(view.contains(&doc.map_bounds().min));
        assert!(view.contains(&doc.map_bounds().max));
    }

    #[test]
    fn test_rebuild_is_geometrically_identical() {
        let doc = document();

        let describe = |map: &Map| {
            map.layers()
                .layers()
                .iter()
                .map(|l| (l.id().to_string(), l.options()))
                .collect::<Vec<_>>()
        };

        let mut first = Map::new(crate::core::geo::Point::new(512.0, 512.0));
        LayerBuilder::build(&doc, &mut first).unwrap();

        let mut second = Map::new(crate::core::geo::Point::new(512.0, 512.0));
        LayerBuilder::build(&doc, &mut second).unwrap();

        assert_eq!(describe(&first), describe(&second));
        assert_eq!(first.viewport().transform(), second.viewport().transform());
    }
}
