pub mod events;
pub mod smooth_zoom;

pub use events::InputEvent;
pub use smooth_zoom::{AnchorMode, SmoothZoom, SmoothZoomConfig, ZoomState};
