use serde::{Deserialize, Serialize};

use comicpaint_core::{BBox, Point};

const MIN_ZOOM: f64 = 0.01;
const MAX_ZOOM: f64 = 100.0;

/// The visible window onto a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Center in canvas coordinates.
    pub center: Point,
    /// Screen pixels per canvas unit.
    pub zoom: f64,
    /// Screen size in pixels.
    pub screen_width: f64,
    pub screen_height: f64,
}

impl Viewport {
    /// A viewport showing the canvas region `[0, width] x [0, height]` at zoom 1.
    pub fn new(screen_width: f64, screen_height: f64) -> Self {
        Self {
            center: Point::new(screen_width / 2.0, screen_height / 2.0),
            zoom: 1.0,
            screen_width,
            screen_height,
        }
    }

    /// Pan by a delta in screen pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.center.x -= dx / self.zoom;
        self.center.y -= dy / self.zoom;
    }

    /// Zoom by `factor`, keeping the canvas point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let before = self.screen_to_canvas(screen);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let after = self.screen_to_canvas(screen);
        self.center.x -= after.x - before.x;
        self.center.y -= after.y - before.y;
    }

    /// Center on `bbox` and zoom so it fills 90% of the screen.
    pub fn fit_bbox(&mut self, bbox: &BBox) {
        self.center = bbox.center();
        let width = bbox.width();
        let height = bbox.height();
        if width <= 0.0 && height <= 0.0 {
            return;
        }
        let zoom_x = if width > 0.0 { self.screen_width / width } else { f64::MAX };
        let zoom_y = if height > 0.0 { self.screen_height / height } else { f64::MAX };
        self.zoom = (zoom_x.min(zoom_y) * 0.9).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.screen_width / 2.0) / self.zoom + self.center.x,
            (screen.y - self.screen_height / 2.0) / self.zoom + self.center.y,
        )
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(
            (canvas.x - self.center.x) * self.zoom + self.screen_width / 2.0,
            (canvas.y - self.center.y) * self.zoom + self.screen_height / 2.0,
        )
    }

    /// The visible region in canvas coordinates.
    pub fn visible_bounds(&self) -> BBox {
        let half_w = self.screen_width / (2.0 * self.zoom);
        let half_h = self.screen_height / (2.0 * self.zoom);
        BBox::new(
            Point::new(self.center.x - half_w, self.center.y - half_h),
            Point::new(self.center.x + half_w, self.center.y + half_h),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_identity_at_start() {
        let vp = Viewport::new(800.0, 600.0);
        let p = Point::new(120.0, 40.0);
        assert!(close(vp.canvas_to_screen(p), p));
        let bounds = vp.visible_bounds();
        assert!(close(bounds.min, Point::new(0.0, 0.0)));
        assert!(close(bounds.max, Point::new(800.0, 600.0)));
    }

    #[test]
    fn test_conversion_roundtrip() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.pan(13.0, -7.0);
        vp.zoom_at(Point::new(100.0, 100.0), 2.5);
        let p = Point::new(321.0, -45.5);
        assert!(close(vp.screen_to_canvas(vp.canvas_to_screen(p)), p));
    }

    #[test]
    fn test_zoom_keeps_cursor_fixed() {
        let mut vp = Viewport::new(800.0, 600.0);
        let cursor = Point::new(200.0, 150.0);
        let before = vp.screen_to_canvas(cursor);
        vp.zoom_at(cursor, 4.0);
        assert!((vp.zoom - 4.0).abs() < 1e-12);
        assert!(close(vp.screen_to_canvas(cursor), before));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.zoom_at(Point::new(0.0, 0.0), 1e9);
        assert_eq!(vp.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_fit_bbox() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.fit_bbox(&BBox::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0)));
        assert!(close(vp.center, Point::new(50.0, 25.0)));
        assert!((vp.zoom - 7.2).abs() < 1e-9);

        // a single point only recenters
        let mut vp = Viewport::new(800.0, 600.0);
        vp.fit_bbox(&BBox::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0)));
        assert!(close(vp.center, Point::new(5.0, 5.0)));
        assert_eq!(vp.zoom, 1.0);
    }
}
