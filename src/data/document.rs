use crate::core::geo::{MapBounds, MapPoint};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Reference to an image asset. Relative references are resolved against
/// a configurable base path during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves a relative reference against `base`. Absolute URLs and
    /// root-relative paths pass through unchanged.
    fn resolve(&self, base: &str) -> ImageRef {
        if self.0.contains("://") || self.0.starts_with('/') || base.is_empty() {
            self.clone()
        } else {
            ImageRef(format!("{}/{}", base.trim_end_matches('/'), self.0))
        }
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A marker category: icon and color shared by all markers referencing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub icon: Option<ImageRef>,
    pub color: String,
}

/// Link rendered in a popup (title anchor and call-to-action button)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupLink {
    pub url: String,
    pub label: String,
}

/// Content of a marker popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupContent {
    pub title: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub link: PopupLink,
}

/// A single map entry: one rendered icon plus one lazily-shown popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: MapPoint,
    pub category_id: String,
    pub popup: PopupContent,
}

// Wire shape of the data document (top-level keys are camelCase JSON).

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    map_image: ImageRef,
    map_bounds: [[f64; 2]; 2],
    categories: Vec<Category>,
    markers: Vec<RawMarker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMarker {
    position: [f64; 2],
    category_id: String,
    popup: PopupContent,
}

/// The normalized, validated map data document. Immutable once loaded;
/// one instance per rendered map.
#[derive(Debug, Clone)]
pub struct MapDocument {
    map_image: ImageRef,
    map_bounds: MapBounds,
    categories: Vec<Category>,
    markers: Vec<Marker>,
    category_index: FxHashMap<String, usize>,
}

impl MapDocument {
    /// Parses and normalizes a raw JSON document string.
    ///
    /// Relative image references are resolved against `base`; a marker
    /// referencing an undeclared category fails the whole document.
    pub fn from_str(raw: &str, base: &str) -> crate::Result<Self> {
        let raw: RawDocument = serde_json::from_str(raw)?;
        Self::normalize(raw, base)
    }

    /// Normalizes an already-parsed JSON value
    pub fn from_value(value: serde_json::Value, base: &str) -> crate::Result<Self> {
        let raw: RawDocument = serde_json::from_value(value)?;
        Self::normalize(raw, base)
    }

    fn normalize(raw: RawDocument, base: &str) -> crate::Result<Self> {
        let mut category_index = FxHashMap::default();
        for (i, category) in raw.categories.iter().enumerate() {
            if category_index.insert(category.id.clone(), i).is_some() {
                return Err(crate::MapError::Validation(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
        }

        for marker in &raw.markers {
            if !category_index.contains_key(&marker.category_id) {
                return Err(crate::MapError::Validation(format!(
                    "marker at ({}, {}) references undeclared category '{}'",
                    marker.position[0], marker.position[1], marker.category_id
                )));
            }
        }

        let categories = raw
            .categories
            .into_iter()
            .map(|c| Category {
                id: c.id,
                icon: c.icon.map(|icon| icon.resolve(base)),
                color: c.color,
            })
            .collect();

        let markers = raw
            .markers
            .into_iter()
            .map(|m| Marker {
                position: m.position.into(),
                category_id: m.category_id,
                popup: PopupContent {
                    title: m.popup.title,
                    description: m.popup.description,
                    image: m.popup.image.map(|img| img.resolve(base)),
                    link: m.popup.link,
                },
            })
            .collect::<Vec<_>>();

        let document = Self {
            map_image: raw.map_image.resolve(base),
            map_bounds: MapBounds::new(raw.map_bounds[0].into(), raw.map_bounds[1].into()),
            categories,
            markers,
            category_index,
        };

        log::debug!(
            "normalized map document: {} categories, {} markers",
            document.categories.len(),
            document.markers.len()
        );

        Ok(document)
    }

    pub fn map_image(&self) -> &ImageRef {
        &self.map_image
    }

    pub fn map_bounds(&self) -> &MapBounds {
        &self.map_bounds
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Looks up a category by id. Total for every `category_id` carried by
    /// this document's markers (guaranteed by normalization).
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_index.get(id).map(|&i| &self.categories[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r##"{
            "mapImage": "images/mainland.png",
            "mapBounds": [[0, 0], [100, 100]],
            "categories": [
                {"id": "camp", "icon": "icons/camp.png", "color": "#ff0000"},
                {"id": "secret", "color": "#fff"}
            ],
            "markers": [
                {
                    "position": [50, 50],
                    "categoryId": "camp",
                    "popup": {
                        "title": "Creeper Woods",
                        "description": "A forested mission area.",
                        "image": "shots/woods.png",
                        "link": {"url": "/wiki/Creeper_Woods", "label": "Read more"}
                    }
                }
            ]
        }"##
    }

    #[test]
    fn test_normalize_valid_document() {
        let doc = MapDocument::from_str(sample_json(), "https://example.org/assets").unwrap();

        assert_eq!(doc.map_image().as_str(), "https://example.org/assets/images/mainland.png");
        assert_eq!(doc.map_bounds().max, MapPoint::new(100.0, 100.0));
        assert_eq!(doc.categories().len(), 2);
        assert_eq!(doc.markers().len(), 1);
        assert_eq!(doc.markers()[0].position, MapPoint::new(50.0, 50.0));
    }

    #[test]
    fn test_category_lookup_total_for_markers() {
        let doc = MapDocument::from_str(sample_json(), "").unwrap();
        for marker in doc.markers() {
            assert!(doc.category(&marker.category_id).is_some());
        }
        assert!(doc.category("nope").is_none());
    }

    #[test]
    fn test_dangling_category_fails_whole_document() {
        let json = r##"{
            "mapImage": "map.png",
            "mapBounds": [[0, 0], [10, 10]],
            "categories": [{"id": "a", "color": "#fff"}],
            "markers": [
                {"position": [1, 1], "categoryId": "a",
                 "popup": {"title": "t", "description": "d", "link": {"url": "u", "label": "l"}}},
                {"position": [2, 2], "categoryId": "ghost",
                 "popup": {"title": "t", "description": "d", "link": {"url": "u", "label": "l"}}}
            ]
        }"##;

        let err = MapDocument::from_str(json, "").unwrap_err();
        assert!(matches!(err, crate::MapError::Validation(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_duplicate_category_id_rejected() {
        let json = r##"{
            "mapImage": "map.png",
            "mapBounds": [[0, 0], [10, 10]],
            "categories": [{"id": "a", "color": "#fff"}, {"id": "a", "color": "#000"}],
            "markers": []
        }"##;

        assert!(matches!(
            MapDocument::from_str(json, ""),
            Err(crate::MapError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_field_is_serialization_error() {
        let json = r#"{"mapImage": "map.png"}"#;
        assert!(matches!(
            MapDocument::from_str(json, ""),
            Err(crate::MapError::Serialization(_))
        ));
    }

    #[test]
    fn test_image_ref_resolution() {
        let absolute = ImageRef::new("https://cdn.example.org/a.png");
        assert_eq!(absolute.resolve("base").as_str(), "https://cdn.example.org/a.png");

        let rooted = ImageRef::new("/images/a.png");
        assert_eq!(rooted.resolve("base").as_str(), "/images/a.png");

        let relative = ImageRef::new("a.png");
        assert_eq!(relative.resolve("https://w/assets/").as_str(), "https://w/assets/a.png");
        assert_eq!(relative.resolve("").as_str(), "a.png");
    }
}
