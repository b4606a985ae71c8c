use crate::{
    core::geo::{MapBounds, Point},
    core::viewport::{Transform, Viewport},
    input::events::InputEvent,
    layers::base::Layer,
    layers::manager::LayerManager,
    traits::MapHost,
};
use std::collections::VecDeque;

/// A concrete map host: owns the shared viewport state, the attached
/// layer set, and the input queue of adapter-translated events.
///
/// By default a wheel tick snaps to the next integer zoom level (the host
/// engine's stock behavior). Installing the smooth zoom controller
/// disables that default so the controller becomes the sole wheel
/// handler, and with it the sole transform writer while animating.
///
/// Once detached (unmounted), every mutation is a contained no-op; a
/// stray operation must never fail into the event loop.
pub struct Map {
    viewport: Viewport,
    layers: LayerManager,
    events: VecDeque<InputEvent>,
    default_wheel_zoom: bool,
    resource_level: i32,
    detached: bool,
}

impl Map {
    pub fn new(size: Point) -> Self {
        let viewport = Viewport::new(size);
        let resource_level = viewport.zoom.round() as i32;
        Self {
            viewport,
            layers: LayerManager::new(),
            events: VecDeque::new(),
            default_wheel_zoom: true,
            resource_level,
            detached: false,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    /// Last discrete resource level requested for image resampling
    pub fn resource_level(&self) -> i32 {
        self.resource_level
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.viewport.set_zoom_limits(min_zoom, max_zoom);
    }

    pub fn default_wheel_zoom(&self) -> bool {
        self.default_wheel_zoom
    }

    /// Stock wheel behavior: snap one integer zoom level per tick,
    /// anchored at the pointer.
    pub fn handle_wheel(&mut self, delta: f64, position: Point) {
        if self.detached || !self.default_wheel_zoom {
            return;
        }
        let step = if delta > 0.0 { 1.0 } else { -1.0 };
        let target = (self.viewport.zoom + step).round();
        self.viewport.zoom_around(target, position);
        self.resource_level = self.viewport.zoom.round() as i32;
    }

    /// Applies the stock handling for all queued events. Hosts with the
    /// smooth zoom controller installed drain the queue through the
    /// controller instead.
    pub fn process_events(&mut self) {
        for event in self.events.drain(..).collect::<Vec<_>>() {
            match event {
                InputEvent::Scroll { delta, position } => self.handle_wheel(delta, position),
                InputEvent::Resize { size } => self.viewport.set_size(size),
            }
        }
    }

    /// Unmounts the map: drops the layer set and turns all further
    /// operations into no-ops. Safe to call multiple times.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.layers.clear();
        self.events.clear();
        log::debug!("map detached");
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl MapHost for Map {
    fn set_view(&mut self, bounds: &MapBounds) {
        if self.detached {
            log::debug!("set_view on detached map ignored");
            return;
        }
        self.viewport.fit_bounds(bounds);
        self.resource_level = self.viewport.zoom.round() as i32;
    }

    fn attach_layer(&mut self, layer: Box<dyn Layer>) -> crate::Result<()> {
        if self.detached {
            log::debug!("attach_layer on detached map ignored");
            return Ok(());
        }
        self.layers.add_layer(layer)
    }

    fn viewport_transform(&self) -> Transform {
        self.viewport.transform()
    }

    fn set_viewport_transform(&mut self, scale: f64, pan: Point) {
        if self.detached {
            log::debug!("set_viewport_transform on detached map ignored");
            return;
        }
        self.viewport.set_transform(scale, pan);
    }

    fn zoom_limits(&self) -> (f64, f64) {
        (self.viewport.min_zoom, self.viewport.max_zoom)
    }

    fn viewport_size(&self) -> Point {
        self.viewport.size
    }

    fn set_default_wheel_zoom(&mut self, enabled: bool) {
        self.default_wheel_zoom = enabled;
    }

    fn request_resource_level(&mut self, level: i32) {
        if self.detached {
            return;
        }
        if level != self.resource_level {
            log::debug!("resource level {} -> {}", self.resource_level, level);
            self.resource_level = level;
        }
    }

    fn push_event(&mut self, event: InputEvent) {
        if self.detached {
            return;
        }
        self.events.push_back(event);
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wheel_snaps_integer_levels() {
        let mut map = Map::new(Point::new(800.0, 600.0));
        map.set_view(&MapBounds::from_coords(0.0, 0.0, 100.0, 100.0));
        let start = map.viewport().zoom;

        map.handle_wheel(1.0, Point::new(400.0, 300.0));
        assert_eq!(map.viewport().zoom, start + 1.0);
        assert_eq!(map.resource_level(), (start + 1.0) as i32);

        map.handle_wheel(-1.0, Point::new(400.0, 300.0));
        assert_eq!(map.viewport().zoom, start);
    }

    #[test]
    fn test_default_wheel_disabled_when_replaced() {
        let mut map = Map::new(Point::new(800.0, 600.0));
        map.set_default_wheel_zoom(false);
        let before = map.viewport().transform();

        map.handle_wheel(1.0, Point::new(10.0, 10.0));
        assert_eq!(map.viewport().transform(), before);
    }

    #[test]
    fn test_detached_map_is_inert() {
        let mut map = Map::new(Point::new(512.0, 512.0));
        map.detach();
        map.detach(); // idempotent

        let before = map.viewport().transform();
        map.set_view(&MapBounds::from_coords(0.0, 0.0, 50.0, 50.0));
        map.set_viewport_transform(4.0, Point::new(9.0, 9.0));
        map.handle_wheel(1.0, Point::new(0.0, 0.0));
        map.push_event(InputEvent::Scroll {
            delta: 1.0,
            position: Point::new(0.0, 0.0),
        });

        assert_eq!(map.viewport().transform(), before);
        assert!(map.drain_events().is_empty());
        assert!(map.layers().is_empty());
    }

    #[test]
    fn test_event_queue_order() {
        let mut map = Map::new(Point::new(512.0, 512.0));
        map.push_event(InputEvent::Scroll {
            delta: 1.0,
            position: Point::new(1.0, 1.0),
        });
        map.push_event(InputEvent::Scroll {
            delta: -1.0,
            position: Point::new(2.0, 2.0),
        });

        let events = map.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], InputEvent::Scroll { delta, .. } if delta > 0.0));
        assert!(map.drain_events().is_empty());
    }
}
