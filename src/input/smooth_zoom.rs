use crate::core::geo::Point;
use crate::input::events::InputEvent;
use crate::traits::MapHost;
use instant::{Duration, Instant};

/// Nominal frame interval, used for the first tick after going idle
const NOMINAL_FRAME: Duration = Duration::from_millis(16);

/// Zoom converges once the remaining distance drops below this
const CONVERGENCE_EPSILON: f64 = 1e-3;

/// Decay rate of the remaining zoom distance, per second. At sensitivity
/// 1.0 roughly 95% of the distance is covered within 250 ms.
const DECAY_RATE: f64 = 12.0;

/// Where the zoom is anchored: the map coordinate under this screen point
/// stays visually stationary while the scale changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// Anchor at the pointer position of the wheel event (default)
    Pointer,
    /// Anchor at the viewport center regardless of the pointer
    Center,
}

#[derive(Debug, Clone, Copy)]
pub struct SmoothZoomConfig {
    pub anchor_mode: AnchorMode,
    /// Zoom speed; scales both the per-event zoom delta and the
    /// animation step. Must be positive.
    pub sensitivity: f64,
}

impl Default for SmoothZoomConfig {
    fn default() -> Self {
        Self {
            anchor_mode: AnchorMode::Pointer,
            sensitivity: 1.0,
        }
    }
}

/// Animation state owned by the controller. Mutated only here; the host
/// reads the resulting transform each tick.
///
/// While `animating` is true, `current_zoom` moves monotonically toward
/// `target_zoom`; `animating` drops exactly when they meet (within
/// epsilon) or the animation is superseded by a retarget.
#[derive(Debug, Clone, Copy)]
pub struct ZoomState {
    pub current_zoom: f64,
    pub target_zoom: f64,
    pub anchor: Point,
    pub animating: bool,
}

/// Replaces the host's discrete per-tick wheel zoom with a continuous,
/// eased, interruptible zoom.
///
/// The state machine has two phases. `Idle`: a wheel delta computes a
/// clamped target and an anchor, starting the animation. `Animating`: a
/// further wheel event does not queue; it retargets from the in-flight
/// zoom value and re-anchors at the new event position, so rapid
/// scrolling stays responsive with no backlog and no visual jump. Each
/// tick advances by an ease-out step proportional to the remaining
/// distance and applies a zoom-around-point transform to the host.
pub struct SmoothZoom {
    config: SmoothZoomConfig,
    state: ZoomState,
    last_tick: Option<Instant>,
    detached: bool,
}

impl SmoothZoom {
    /// Installs the controller on a host, replacing its default wheel
    /// handling.
    pub fn install(config: SmoothZoomConfig, host: &mut dyn MapHost) -> Self {
        host.set_default_wheel_zoom(false);
        let current_zoom = host.viewport_transform().scale.log2();
        Self {
            config,
            state: ZoomState {
                current_zoom,
                target_zoom: current_zoom,
                anchor: host.viewport_size().multiply(0.5),
                animating: false,
            },
            last_tick: None,
            detached: false,
        }
    }

    pub fn state(&self) -> &ZoomState {
        &self.state
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Handles one wheel/gesture delta. From `Idle` this starts the
    /// animation; while `Animating` it retargets from the in-flight zoom.
    pub fn on_scroll(&mut self, delta: f64, position: Point, host: &dyn MapHost) {
        if self.detached {
            return;
        }

        let (min_zoom, max_zoom) = host.zoom_limits();

        if !self.state.animating {
            // Pick up any zoom applied outside the controller while idle
            self.state.current_zoom = host.viewport_transform().scale.log2();
        }

        let target =
            (self.state.current_zoom + delta * self.config.sensitivity).clamp(min_zoom, max_zoom);

        self.state.anchor = match self.config.anchor_mode {
            AnchorMode::Pointer => position,
            AnchorMode::Center => host.viewport_size().multiply(0.5),
        };

        if self.state.animating {
            log::trace!(
                "retarget zoom {:.3} -> {:.3} (in-flight {:.3})",
                self.state.target_zoom,
                target,
                self.state.current_zoom
            );
        }

        self.state.target_zoom = target;
        self.state.animating =
            (self.state.target_zoom - self.state.current_zoom).abs() > CONVERGENCE_EPSILON;
    }

    /// Advances the animation using wall-clock elapsed time since the
    /// previous frame. The caller's frame loop reschedules itself while
    /// this returns true.
    pub fn tick_now(&mut self, host: &mut dyn MapHost) -> bool {
        let now = Instant::now();
        let dt = match self.last_tick {
            Some(last) => now - last,
            None => NOMINAL_FRAME,
        };
        let animating = self.tick(dt, host);
        self.last_tick = if animating { Some(now) } else { None };
        animating
    }

    /// Advances the animation by `dt` and applies the resulting
    /// zoom-around-point transform to the host.
    ///
    /// Returns whether another frame is needed; the caller's frame loop
    /// reschedules itself while this is true and stops otherwise. A tick
    /// after [`detach`](Self::detach) never touches the host.
    pub fn tick(&mut self, dt: Duration, host: &mut dyn MapHost) -> bool {
        if self.detached {
            log::debug!("tick after detach ignored");
            return false;
        }
        if !self.state.animating {
            return false;
        }

        let remaining = self.state.target_zoom - self.state.current_zoom;

        // Ease-out: the step is an exponential-decay fraction of the
        // remaining distance, scaled by elapsed time and sensitivity.
        let alpha = 1.0 - (-DECAY_RATE * self.config.sensitivity * dt.as_secs_f64()).exp();
        let mut next = self.state.current_zoom + remaining * alpha;

        if (self.state.target_zoom - next).abs() <= CONVERGENCE_EPSILON {
            next = self.state.target_zoom;
            self.state.animating = false;
        }

        self.apply_zoom(next, host);
        self.state.current_zoom = next;

        self.state.animating
    }

    /// Applies the zoom-around-point algebra so the map coordinate under
    /// the anchor stays fixed: `new_pan = a - (a - pan) * (s1 / s0)`.
    fn apply_zoom(&self, zoom: f64, host: &mut dyn MapHost) {
        let old = host.viewport_transform();
        let new_scale = 2_f64.powf(zoom);
        let ratio = new_scale / old.scale;
        let anchor = self.state.anchor;

        let new_pan = anchor.subtract(&anchor.subtract(&old.pan).multiply(ratio));
        host.set_viewport_transform(new_scale, new_pan);

        // Nearest discrete level for image resampling; never blocks the
        // continuous transform.
        host.request_resource_level(zoom.round() as i32);
    }

    /// Drains the host's input queue, feeding wheel deltas to the
    /// controller. Non-wheel events are not this handler's concern.
    /// Returns whether an animation is in flight.
    pub fn pump(&mut self, host: &mut dyn MapHost) -> bool {
        if self.detached {
            return false;
        }
        for event in host.drain_events() {
            if let InputEvent::Scroll { delta, position } = event {
                self.on_scroll(delta, position, host);
            }
        }
        self.state.animating
    }

    /// Stops the animation and detaches the input handler. Idempotent;
    /// after this no tick mutates the host.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.state.animating = false;
        log::debug!("smooth zoom detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{MapBounds, Point};
    use crate::core::map::Map;
    use crate::traits::MapHost;

    const FRAME: Duration = Duration::from_millis(16);

    fn fitted_map() -> Map {
        let mut map = Map::new(Point::new(800.0, 600.0));
        map.set_view(&MapBounds::from_coords(0.0, 0.0, 100.0, 100.0));
        map
    }

    fn run_to_idle(zoom: &mut SmoothZoom, map: &mut Map) -> usize {
        let mut ticks = 0;
        while zoom.tick(FRAME, map) {
            ticks += 1;
            assert!(ticks < 1000, "animation did not converge");
        }
        ticks
    }

    #[test]
    fn test_install_replaces_default_wheel() {
        let mut map = fitted_map();
        assert!(map.default_wheel_zoom());
        let zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);
        assert!(!map.default_wheel_zoom());
        assert!(!zoom.state().animating);
    }

    #[test]
    fn test_convergence_to_delta_times_sensitivity() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(
            SmoothZoomConfig {
                sensitivity: 3.0,
                ..Default::default()
            },
            &mut map,
        );

        let start = zoom.state().current_zoom;
        zoom.on_scroll(0.5, Point::new(400.0, 300.0), &map);
        assert!(zoom.state().animating);

        run_to_idle(&mut zoom, &mut map);

        assert!(!zoom.state().animating);
        assert!((zoom.state().current_zoom - (start + 1.5)).abs() < 1e-9);
        assert!((map.viewport().zoom - (start + 1.5)).abs() < 1e-9);
    }

    #[test]
    fn test_target_clamped_to_zoom_limits() {
        let mut map = fitted_map();
        map.set_zoom_limits(-2.0, 4.0);
        let mut zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);

        zoom.on_scroll(100.0, Point::new(400.0, 300.0), &map);
        assert_eq!(zoom.state().target_zoom, 4.0);

        run_to_idle(&mut zoom, &mut map);
        assert_eq!(map.viewport().zoom, 4.0);
    }

    #[test]
    fn test_monotonic_progress_toward_target() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);

        zoom.on_scroll(2.0, Point::new(100.0, 100.0), &map);
        let target = zoom.state().target_zoom;

        let mut last = zoom.state().current_zoom;
        while zoom.tick(FRAME, &mut map) {
            let now = zoom.state().current_zoom;
            assert!(now > last && now <= target);
            last = now;
        }
        assert_eq!(zoom.state().current_zoom, target);
    }

    #[test]
    fn test_retarget_recomputes_from_inflight_zoom() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);

        zoom.on_scroll(2.0, Point::new(100.0, 100.0), &map);
        zoom.tick(FRAME, &mut map);
        zoom.tick(FRAME, &mut map);

        let inflight = zoom.state().current_zoom;
        zoom.on_scroll(-0.5, Point::new(300.0, 200.0), &map);

        // Target recomputed from the in-flight value, anchor re-set
        assert!((zoom.state().target_zoom - (inflight - 0.5)).abs() < 1e-9);
        assert_eq!(zoom.state().anchor, Point::new(300.0, 200.0));

        run_to_idle(&mut zoom, &mut map);
        assert!((map.viewport().zoom - (inflight - 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_center_anchor_mode() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(
            SmoothZoomConfig {
                anchor_mode: AnchorMode::Center,
                ..Default::default()
            },
            &mut map,
        );

        zoom.on_scroll(1.0, Point::new(17.0, 23.0), &map);
        assert_eq!(zoom.state().anchor, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_anchor_point_invariant_each_tick() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);

        let anchor = Point::new(250.0, 180.0);
        zoom.on_scroll(1.5, anchor, &map);

        let fixed = map.viewport().unproject(&anchor);
        while zoom.tick(FRAME, &mut map) {
            let now = map.viewport().unproject(&anchor);
            assert!(fixed.distance_to(&now) < 1e-6);
        }
    }

    #[test]
    fn test_resource_level_follows_rounded_zoom() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);

        let start = zoom.state().current_zoom;
        zoom.on_scroll(2.0, Point::new(400.0, 300.0), &map);
        run_to_idle(&mut zoom, &mut map);

        assert_eq!(map.resource_level(), (start + 2.0).round() as i32);
    }

    #[test]
    fn test_tick_now_advances_on_first_frame() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);

        zoom.on_scroll(1.0, Point::new(400.0, 300.0), &map);
        let before = zoom.state().current_zoom;

        zoom.tick_now(&mut map);
        assert!(zoom.state().current_zoom > before);
    }

    #[test]
    fn test_detach_silences_queued_tick() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);

        zoom.on_scroll(2.0, Point::new(100.0, 100.0), &map);
        zoom.tick(FRAME, &mut map);
        let transform = map.viewport().transform();

        zoom.detach();
        zoom.detach(); // idempotent

        // A queued frame callback firing after teardown must not touch
        // the viewport
        assert!(!zoom.tick(FRAME, &mut map));
        assert_eq!(map.viewport().transform(), transform);
        assert!(!zoom.state().animating);

        zoom.on_scroll(1.0, Point::new(0.0, 0.0), &map);
        assert!(!zoom.state().animating);
    }

    #[test]
    fn test_pump_consumes_scroll_events() {
        let mut map = fitted_map();
        let mut zoom = SmoothZoom::install(SmoothZoomConfig::default(), &mut map);

        map.push_event(InputEvent::Scroll {
            delta: 1.0,
            position: Point::new(400.0, 300.0),
        });
        map.push_event(InputEvent::Resize {
            size: Point::new(1024.0, 768.0),
        });

        assert!(zoom.pump(&mut map));
        assert!(map.drain_events().is_empty());
        assert!(zoom.state().animating);
    }
}
