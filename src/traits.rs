//! Shared trait seams between the map core and a concrete rendering engine.

use crate::core::geo::{MapBounds, Point};
use crate::core::viewport::Transform;
use crate::input::events::InputEvent;
use crate::layers::base::Layer;

/// Contract boundary to the underlying pan/zoom rendering engine.
///
/// The smooth zoom controller and the layer builder depend only on this
/// trait, never on a concrete engine, so the rendering library underneath
/// can be substituted. The host owns the shared viewport state; all
/// transform mutation goes through [`viewport_transform`] /
/// [`set_viewport_transform`], never through an aliased handle.
///
/// [`viewport_transform`]: MapHost::viewport_transform
/// [`set_viewport_transform`]: MapHost::set_viewport_transform
pub trait MapHost {
    /// Fits the viewport to the given map-space bounds.
    fn set_view(&mut self, bounds: &MapBounds);

    /// Attaches a renderable layer to the viewport's layer set.
    fn attach_layer(&mut self, layer: Box<dyn Layer>) -> crate::Result<()>;

    /// Current viewport transform (scale and pan offset).
    fn viewport_transform(&self) -> Transform;

    /// Replaces the viewport transform. A detached host must treat this
    /// as a no-op rather than failing.
    fn set_viewport_transform(&mut self, scale: f64, pan: Point);

    /// Configured `(min_zoom, max_zoom)` range.
    fn zoom_limits(&self) -> (f64, f64);

    /// Viewport size in screen pixels.
    fn viewport_size(&self) -> Point;

    /// Requests the discrete resource level (image resampling) nearest to
    /// the continuous zoom, without touching the visual transform.
    fn request_resource_level(&mut self, level: i32);

    /// Enables or disables the host's own discrete wheel handling. An
    /// alternate wheel handler (the smooth zoom controller) turns it off
    /// when it registers itself.
    fn set_default_wheel_zoom(&mut self, enabled: bool);

    /// Queues an adapter-translated input event (wheel/gesture delta).
    fn push_event(&mut self, event: InputEvent);

    /// Drains all queued input events in arrival order.
    fn drain_events(&mut self) -> Vec<InputEvent>;
}
