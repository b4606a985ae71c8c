use crate::core::geo::Point;
use crate::data::document::{Category, ImageRef};

const IMAGE_ICON_SIZE: f64 = 26.0;
const VECTOR_ICON_SIZE: f64 = 20.0;

/// A marker icon, selected once per category at layer-build time: either
/// the category's declared image, or a generated teardrop vector tinted
/// with the category color.
///
/// Both variants are anchored at bottom-center, so the icon "points" at
/// its map coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Image(ImageIcon),
    Vector(VectorIcon),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageIcon {
    pub url: ImageRef,
    pub size: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorIcon {
    pub color: String,
    pub size: Point,
}

impl Icon {
    /// Resolves the icon for a category
    pub fn for_category(category: &Category) -> Self {
        match &category.icon {
            Some(url) => Icon::Image(ImageIcon {
                url: url.clone(),
                size: Point::new(IMAGE_ICON_SIZE, IMAGE_ICON_SIZE),
            }),
            None => Icon::Vector(VectorIcon {
                color: category.color.clone(),
                size: Point::new(VECTOR_ICON_SIZE, VECTOR_ICON_SIZE),
            }),
        }
    }

    pub fn size(&self) -> Point {
        match self {
            Icon::Image(icon) => icon.size,
            Icon::Vector(icon) => icon.size,
        }
    }

    /// Anchor offset from the icon's top-left corner: bottom-center,
    /// `(width / 2, height)`.
    pub fn anchor(&self) -> Point {
        let size = self.size();
        Point::new(size.x / 2.0, size.y)
    }

    /// Inline markup for the icon: an `<img>` for image icons, a tinted
    /// teardrop `<svg>` for vector icons.
    pub fn markup(&self) -> String {
        match self {
            Icon::Image(icon) => format!(
                r#"<img src="{}" width="{}" height="{}">"#,
                icon.url,
                icon.size.x as u32,
                icon.size.y as u32
            ),
            Icon::Vector(icon) => format!(
                concat!(
                    r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" "#,
                    r#"viewBox="0 0 20 20" fill="{color}">"#,
                    r#"<path d="M10 0a7.65 7.65 0 0 0-8 8c0 2.52 2 5 3 6s5 6 5 6 4-5 5-6 "#,
                    r#"3-3.48 3-6a7.65 7.65 0 0 0-8-8m0 11.25A3.25 3.25 0 1 1 13.25 8 "#,
                    r#"3.25 3.25 0 0 1 10 11.25"/></svg>"#,
                ),
                w = icon.size.x as u32,
                h = icon.size.y as u32,
                color = icon.color,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::document::Category;

    fn category(icon: Option<&str>) -> Category {
        Category {
            id: "c".to_string(),
            icon: icon.map(ImageRef::new),
            color: "#3388ff".to_string(),
        }
    }

    #[test]
    fn test_image_icon_selected_when_declared() {
        let icon = Icon::for_category(&category(Some("camp.png")));
        assert!(matches!(icon, Icon::Image(_)));
        assert_eq!(icon.size(), Point::new(26.0, 26.0));
        assert_eq!(icon.anchor(), Point::new(13.0, 26.0));
    }

    #[test]
    fn test_vector_fallback_tinted_with_category_color() {
        let icon = Icon::for_category(&category(None));
        assert!(matches!(icon, Icon::Vector(_)));
        assert_eq!(icon.anchor(), Point::new(10.0, 20.0));
        assert!(icon.markup().contains(r##"fill="#3388ff""##));
    }

    #[test]
    fn test_anchor_is_bottom_center() {
        for icon in [
            Icon::for_category(&category(Some("a.png"))),
            Icon::for_category(&category(None)),
        ] {
            let size = icon.size();
            assert_eq!(icon.anchor(), Point::new(size.x / 2.0, size.y));
        }
    }
}
