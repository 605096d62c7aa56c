//! Collision detection
//!
//! The body is a circle; obstacles are full-height columns with a gap. The
//! circle is treated by its bounding span on each axis, which matches how the
//! gap columns are drawn.

use super::body::Body;
use super::obstacle::{Obstacle, ObstacleField};
use super::state::World;

/// Ground or ceiling contact. Touching either counts.
pub fn body_hits_bounds(body: &Body, world: &World) -> bool {
    body.bottom() >= world.ground_y() || body.top() <= 0.0
}

/// Check one obstacle against the body
pub fn body_hits_obstacle(body: &Body, obstacle: &Obstacle, width: f32, gap: f32) -> bool {
    let within_x = body.x + body.radius > obstacle.x && body.x - body.radius < obstacle.x + width;
    if !within_x {
        return false;
    }
    let (gap_top, gap_bottom) = obstacle.gap_bounds(gap);
    body.top() < gap_top || body.bottom() > gap_bottom
}

/// True if the body touches the world bounds or any obstacle.
///
/// Every obstacle is checked; at high scroll speeds more than one can overlap
/// the body's horizontal span.
pub fn collides(body: &Body, field: &ObstacleField, world: &World) -> bool {
    if body_hits_bounds(body, world) {
        return true;
    }
    field
        .iter()
        .any(|obstacle| body_hits_obstacle(body, obstacle, field.width, field.gap))
}
