use crate::core::geo::{MapBounds, MapPoint, Point};
use serde::{Deserialize, Serialize};

/// The viewport transform: `screen = map_point * scale + pan`.
///
/// `scale` is continuous (`2^zoom`); pan is the screen-pixel offset of the
/// map-space origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: f64,
    pub pan: Point,
}

impl Transform {
    pub fn new(scale: f64, pan: Point) -> Self {
        Self { scale, pan }
    }

    pub fn identity() -> Self {
        Self::new(1.0, Point::new(0.0, 0.0))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Manages the current view of the map: zoom, pan offset, and screen size.
///
/// Zoom is a continuous float; the rendered scale is `2^zoom`. The host's
/// discrete rendering may resample imagery at integer levels, but the
/// viewport itself never snaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The current zoom level (continuous)
    pub zoom: f64,
    /// Screen-pixel offset of the map-space origin
    pub pan: Point,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport with the map origin at the screen origin
    pub fn new(size: Point) -> Self {
        Self {
            zoom: 0.0,
            pan: Point::new(0.0, 0.0),
            size,
            min_zoom: -5.0,
            max_zoom: 18.0,
        }
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Gets the current transform
    pub fn transform(&self) -> Transform {
        Transform::new(self.scale(), self.pan)
    }

    /// Replaces the transform wholesale (scale and pan)
    pub fn set_transform(&mut self, scale: f64, pan: Point) {
        self.zoom = scale.log2();
        self.pan = pan;
    }

    /// Sets the zoom level, clamping to the configured range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Projects a map-space coordinate to screen pixels
    pub fn project(&self, point: &MapPoint) -> Point {
        let scale = self.scale();
        Point::new(point.x * scale + self.pan.x, point.y * scale + self.pan.y)
    }

    /// Unprojects screen pixels back to a map-space coordinate
    pub fn unproject(&self, pixel: &Point) -> MapPoint {
        let scale = self.scale();
        MapPoint::new((pixel.x - self.pan.x) / scale, (pixel.y - self.pan.y) / scale)
    }

    /// Zooms to a level while keeping the map coordinate under `anchor`
    /// visually stationary.
    ///
    /// Zoom-to-point algebra: `new_pan = anchor - (anchor - pan) * (s1/s0)`.
    pub fn zoom_around(&mut self, zoom: f64, anchor: Point) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        let old_scale = self.scale();
        let new_scale = 2_f64.powf(new_zoom);
        let ratio = new_scale / old_scale;

        self.pan = anchor.subtract(&anchor.subtract(&self.pan).multiply(ratio));
        self.zoom = new_zoom;
    }

    /// Pans the viewport by a screen-pixel delta
    pub fn pan_by(&mut self, delta: Point) {
        self.pan = self.pan.add(&delta);
    }

    /// Fits the viewport to contain the given map-space bounds.
    ///
    /// Picks the best integer zoom level at which the bounds fit the
    /// viewport, then centers the bounds on screen.
    pub fn fit_bounds(&mut self, bounds: &MapBounds) {
        let mut best_zoom = self.min_zoom;

        for test_zoom in (self.min_zoom.ceil() as i32)..=(self.max_zoom.floor() as i32) {
            let zoom = f64::from(test_zoom);
            let scale = 2_f64.powf(zoom);

            if bounds.width() * scale <= self.size.x && bounds.height() * scale <= self.size.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        self.zoom = best_zoom.clamp(self.min_zoom, self.max_zoom);

        let center = bounds.center();
        let scale = self.scale();
        self.pan = Point::new(
            self.size.x / 2.0 - center.x * scale,
            self.size.y / 2.0 - center.y * scale,
        );

        log::debug!(
            "fit_bounds -> zoom {} pan ({:.1}, {:.1})",
            self.zoom,
            self.pan.x,
            self.pan.y
        );
    }

    /// Gets the current viewport bounds in map-space coordinates
    pub fn bounds(&self) -> MapBounds {
        let min = self.unproject(&Point::new(0.0, 0.0));
        let max = self.unproject(&self.size);
        MapBounds::new(min, max)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Point::new(800.0, 600.0))
    }
}
