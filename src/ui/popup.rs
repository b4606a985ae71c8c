use crate::data::document::PopupContent;
use once_cell::sync::OnceCell;

/// A marker popup. The markup (title link, description, optional image
/// and a call-to-action button) is built lazily, at most once, on first
/// open; markers that are never interacted with never pay for it.
pub struct Popup {
    content: PopupContent,
    markup: OnceCell<String>,
    visible: bool,
}

impl Popup {
    pub fn new(content: PopupContent) -> Self {
        Self {
            content,
            markup: OnceCell::new(),
            visible: false,
        }
    }

    pub fn content(&self) -> &PopupContent {
        &self.content
    }

    /// Whether the markup has been constructed yet
    pub fn is_built(&self) -> bool {
        self.markup.get().is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opens the popup, building its markup on first open
    pub fn open(&mut self) -> &str {
        self.visible = true;
        self.markup.get_or_init(|| build_markup(&self.content))
    }

    pub fn close(&mut self) {
        self.visible = false;
    }
}

/// Renders the popup body. Content is trusted authored text and passes
/// through unescaped.
fn build_markup(content: &PopupContent) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<h3><a href=\"{}\">{}</a></h3>\n",
        content.link.url, content.title
    ));
    html.push_str(&format!("<p>{}</p>\n", content.description));

    if let Some(image) = &content.image {
        html.push_str(&format!(
            "<img class=\"popup-image\" src=\"{image}\">\n"
        ));
    }

    html.push_str(&format!(
        "<a href=\"{}\" class=\"cdx-button cdx-button--action-progressive\" role=\"button\">{}</a>",
        content.link.url, content.link.label
    ));

    html
}
