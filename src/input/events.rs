use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Input events delivered through the host adapter, already translated
/// out of any engine-specific event object shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Wheel tick or pinch gesture delta. Positive zooms in.
    Scroll { delta: f64, position: Point },
    /// Viewport resize
    Resize { size: Point },
}

impl InputEvent {
    /// Gets the screen position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::Scroll { position, .. } => Some(*position),
            InputEvent::Resize { .. } => None,
        }
    }
}
