//! Rendering hooks for Pathbench
//!
//! Geometry and clearance code never draws anything itself. It emits events
//! into a [`RenderSink`]; a renderer decides what to do with them.

/// World bounds and screen mapping
pub mod viewport;

pub use viewport::{Viewport, WorldBounds};

use crate::core::Obstacle;
use crate::navigation::Goal;
use log::debug;
use nalgebra::Point2;

/// Receiver for draw events
#[cfg_attr(test, mockall::automock)]
pub trait RenderSink {
    /// An obstacle and the inflation applied around it
    fn draw_obstacle(&mut self, obstacle: &Obstacle, inflation: f64);
    /// The goal disc
    fn draw_goal(&mut self, goal: &Goal);
    /// One sampled sub-step of robot motion with the clearance at its end
    fn draw_path_segment(&mut self, from: Point2<f64>, to: Point2<f64>, clearance: f64);
}

/// Discards every event
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_obstacle(&mut self, _obstacle: &Obstacle, _inflation: f64) {}
    fn draw_goal(&mut self, _goal: &Goal) {}
    fn draw_path_segment(&mut self, _from: Point2<f64>, _to: Point2<f64>, _clearance: f64) {}
}

/// Logs every event at debug level in screen coordinates
pub struct LogSink {
    viewport: Viewport,
    segments: usize,
}

impl LogSink {
    /// Sink projecting events through `viewport`
    pub fn new(viewport: Viewport) -> Self {
        LogSink {
            viewport,
            segments: 0,
        }
    }

    /// Number of path segments seen so far
    pub fn segments(&self) -> usize {
        self.segments
    }
}

impl RenderSink for LogSink {
    fn draw_obstacle(&mut self, obstacle: &Obstacle, inflation: f64) {
        let center = self.viewport.to_screen(&obstacle.center());
        debug!(
            "draw {} at px ({:.1}, {:.1}) radius {:.1}px, inflated {:.1}px",
            obstacle.kind(),
            center.x,
            center.y,
            obstacle.effective_radius() * self.viewport.scale(),
            (obstacle.effective_radius() + inflation) * self.viewport.scale()
        );
    }

    fn draw_goal(&mut self, goal: &Goal) {
        let at = self.viewport.to_screen(&goal.position);
        debug!("draw goal at px ({:.1}, {:.1})", at.x, at.y);
    }

    fn draw_path_segment(&mut self, from: Point2<f64>, to: Point2<f64>, clearance: f64) {
        self.segments += 1;
        let (a, b) = (self.viewport.to_screen(&from), self.viewport.to_screen(&to));
        debug!(
            "segment {} px ({:.1}, {:.1}) -> ({:.1}, {:.1}) clearance {:.3}",
            self.segments, a.x, a.y, b.x, b.y, clearance
        );
    }
}

/// Emits the static scene: every obstacle, then the goal disc
pub fn draw_scene(sink: &mut dyn RenderSink, obstacles: &[Obstacle], inflation: f64, goal: &Goal) {
    for obstacle in obstacles {
        sink.draw_obstacle(obstacle, inflation);
    }
    sink.draw_goal(goal);
}
