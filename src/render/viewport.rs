// src/render/viewport.rs
// Fits the world (start, goal and inflated obstacles) onto a screen so a
// renderer can draw everything in view.

use crate::core::Obstacle;
use nalgebra::Point2;

/// Smallest padding added around the world bounds, cm
const MIN_PAD_CM: f64 = 20.0;

/// World rectangle in cm
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    /// Lower-left corner, cm
    pub min: Point2<f64>,
    /// Upper-right corner, cm
    pub max: Point2<f64>,
}

impl WorldBounds {
    /// Covers start, goal and every obstacle disc grown by `inflation`,
    /// padded by 10% of the larger extent (at least 20 cm)
    pub fn fit(
        start: &Point2<f64>,
        goal: &Point2<f64>,
        obstacles: &[Obstacle],
        inflation: f64,
    ) -> Self {
        let mut min = Point2::new(start.x.min(goal.x), start.y.min(goal.y));
        let mut max = Point2::new(start.x.max(goal.x), start.y.max(goal.y));

        for obstacle in obstacles {
            let center = obstacle.center();
            let reach = obstacle.effective_radius() + inflation;
            min.x = min.x.min(center.x - reach);
            min.y = min.y.min(center.y - reach);
            max.x = max.x.max(center.x + reach);
            max.y = max.y.max(center.y + reach);
        }

        let pad = MIN_PAD_CM.max(0.1 * (max.x - min.x).max(max.y - min.y));
        WorldBounds {
            min: Point2::new(min.x - pad, min.y - pad),
            max: Point2::new(max.x + pad, max.y + pad),
        }
    }

    /// Extent along x, cm
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y, cm
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Maps world cm onto screen pixels, y pointing down, aspect preserved
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    bounds: WorldBounds,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    screen_height: f64,
}

impl Viewport {
    /// Largest uniform scale that fits `bounds` on screen, centered
    pub fn new(bounds: WorldBounds, screen_width: u32, screen_height: u32) -> Self {
        let (sw, sh) = (f64::from(screen_width), f64::from(screen_height));
        let scale = (sw / bounds.width()).min(sh / bounds.height());
        Viewport {
            bounds,
            scale,
            offset_x: 0.5 * (sw - bounds.width() * scale),
            offset_y: 0.5 * (sh - bounds.height() * scale),
            screen_height: sh,
        }
    }

    /// Pixels per cm
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Screen pixel for a world point
    pub fn to_screen(&self, world: &Point2<f64>) -> Point2<f64> {
        let x = self.offset_x + (world.x - self.bounds.min.x) * self.scale;
        let y = self.offset_y + (world.y - self.bounds.min.y) * self.scale;
        Point2::new(x, self.screen_height - y)
    }
}
