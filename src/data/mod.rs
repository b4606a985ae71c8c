pub mod document;
pub mod fetch;

pub use document::{Category, ImageRef, MapDocument, Marker, PopupContent, PopupLink};
pub use fetch::{fetch_document, load_document};
