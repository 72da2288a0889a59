//! Proximity and containment tests
//!
//! All interaction checks are either axis-aligned containment (cubicles) or
//! Euclidean distance against a fixed radius (trash, clients, projectiles).
//! Thresholds live in `crate::consts` and are not configurable at runtime.

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, PROJECTILE_HIT_RADIUS};

/// True when two points are strictly closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// True when a projectile at `pos` has reached the player
#[inline]
pub fn projectile_hits_player(pos: Vec2, player_pos: Vec2) -> bool {
    within_radius(pos, player_pos, PROJECTILE_HIT_RADIUS)
}

/// True when a point has left the play field entirely
#[inline]
pub fn out_of_field(pos: Vec2) -> bool {
    pos.x < 0.0 || pos.x > FIELD_WIDTH || pos.y < 0.0 || pos.y > FIELD_HEIGHT
}
