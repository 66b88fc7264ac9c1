//! Pure swipe classification and the visual quantities derived from a drag.

use bevy::math::Vec2;

use crate::config::SwipeConfig;
use crate::direction::{Axis, SwipeDirection};

pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 1000.0;
pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 120.0;

/// Picks the direction of the dominant axis, or `None` on an exact tie
/// (including the zero vector).
fn dominant_direction(x: f32, y: f32) -> Option<SwipeDirection> {
    let (ax, ay) = (x.abs(), y.abs());
    if ax > ay {
        Some(if x > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        })
    } else if ay > ax {
        Some(if y > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        })
    } else {
        None
    }
}

pub fn classify_by_velocity(vx: f32, vy: f32) -> Option<SwipeDirection> {
    dominant_direction(vx, vy)
}

pub fn classify_by_distance(dx: f32, dy: f32) -> Option<SwipeDirection> {
    dominant_direction(dx, dy)
}

/// Either a fast flick or a long drag completes a swipe.
pub fn is_complete(
    velocity: f32,
    distance: f32,
    velocity_threshold: f32,
    distance_threshold: f32,
) -> bool {
    velocity.abs() > velocity_threshold || distance.abs() > distance_threshold
}

/// Signed component of `v` along the axis of `direction`.
pub const fn project(v: Vec2, direction: SwipeDirection) -> f32 {
    match direction.axis() {
        Axis::Horizontal => v.x,
        Axis::Vertical => v.y,
    }
}

/// Resolves the direction of a finished drag.
///
/// Velocity decides when its dominant component is past the velocity
/// threshold. Otherwise the displacement decides, and a tied displacement
/// falls back to whatever direction the velocity leans. Both tied means the
/// gesture is not a swipe.
pub fn resolve_direction(
    offset: Vec2,
    velocity: Vec2,
    velocity_threshold: f32,
) -> Option<SwipeDirection> {
    let by_velocity = classify_by_velocity(velocity.x, velocity.y);
    let conclusive = by_velocity.filter(|&d| project(velocity, d).abs() > velocity_threshold);
    conclusive
        .or_else(|| classify_by_distance(offset.x, offset.y))
        .or(by_velocity)
}

pub fn rotation_angle(dx: f32, multiplier: f32, max_degrees: f32) -> f32 {
    (dx * multiplier).clamp(-max_degrees, max_degrees)
}

pub fn overlay_opacity(distance: f32, fade_start: f32, fade_end: f32, max_opacity: f32) -> f32 {
    let distance = distance.abs();
    if distance <= fade_start {
        0.0
    } else if distance >= fade_end {
        max_opacity
    } else {
        max_opacity * (distance - fade_start) / (fade_end - fade_start)
    }
}

/// Per-direction overlay opacities for one drag offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayOpacity {
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
}

impl OverlayOpacity {
    /// Each overlay fades in from the signed component pointing its way.
    /// Components pointing the other way contribute nothing.
    pub fn from_offset(offset: Vec2, config: &SwipeConfig) -> Self {
        let fade = |component: f32| {
            overlay_opacity(
                component.max(0.0),
                config.overlay_fade_start,
                config.overlay_fade_end,
                config.overlay_max_opacity,
            )
        };
        Self {
            left: fade(-offset.x),
            right: fade(offset.x),
            up: fade(-offset.y),
            down: fade(offset.y),
        }
    }

    pub const fn get(&self, direction: SwipeDirection) -> f32 {
        match direction {
            SwipeDirection::Left => self.left,
            SwipeDirection::Right => self.right,
            SwipeDirection::Up => self.up,
            SwipeDirection::Down => self.down,
        }
    }
}
