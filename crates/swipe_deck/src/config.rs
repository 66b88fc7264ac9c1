use serde::{Deserialize, Serialize};

use crate::classifier::{DEFAULT_DISTANCE_THRESHOLD, DEFAULT_VELOCITY_THRESHOLD};
use crate::error::ConfigError;
use crate::spring::Spring;

// typical smartphone screen ratio (9:16)
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 360.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 640.0;

/// Every tunable of the swipe engine.
///
/// Distances are device-independent pixels, velocities pixels per second,
/// angles degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    // Completion
    /// Release speed along the dominant axis that completes a swipe
    pub velocity_threshold: f32,
    /// Displacement along the dominant axis that completes a swipe
    pub distance_threshold: f32,

    // Deck
    /// Number of cards materialized at once
    pub visible_count: usize,
    /// Remaining depth at or below which more items are requested
    pub min_threshold: usize,

    // Visuals
    /// Degrees of rotation per pixel of horizontal drag
    pub rotation_multiplier: f32,
    /// Rotation clamp, symmetric around zero
    pub max_rotation: f32,
    /// Displacement where a direction overlay starts to fade in
    pub overlay_fade_start: f32,
    /// Displacement where a direction overlay reaches full opacity
    pub overlay_fade_end: f32,
    /// Opacity cap for direction overlays
    pub overlay_max_opacity: f32,
    /// Scale the top card eases toward while held
    pub grabbed_scale: f32,

    // Taps
    /// Displacement below which a release may count as a tap
    pub tap_slop: f32,
    /// Release speed below which a release may count as a tap
    pub tap_velocity: f32,

    // Exit geometry
    pub viewport_width: f32,
    pub viewport_height: f32,

    // Motion profiles
    /// Scale easing on grab and release
    pub scale_spring: Spring,
    /// Stiff, low-overshoot profile flinging the card off screen
    pub exit_spring: Spring,
    /// Softer profile bringing the card back to rest
    pub return_spring: Spring,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,

            visible_count: 3,
            min_threshold: 3,

            rotation_multiplier: 0.15,
            max_rotation: 15.0,
            overlay_fade_start: 40.0,
            overlay_fade_end: 80.0,
            overlay_max_opacity: 0.8,
            grabbed_scale: 0.95,

            tap_slop: 8.0,
            tap_velocity: 100.0,

            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,

            scale_spring: Spring::new(300.0, 20.0),
            exit_spring: Spring::new(200.0, 25.0),
            return_spring: Spring::new(150.0, 15.0),
        }
    }
}

impl SwipeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visible_count == 0 {
            return Err(ConfigError::EmptyVisibleWindow);
        }
        if self.min_threshold > self.visible_count {
            return Err(ConfigError::ThresholdExceedsWindow {
                min_threshold: self.min_threshold,
                visible_count: self.visible_count,
            });
        }

        for (name, value) in [
            ("velocity threshold", self.velocity_threshold),
            ("distance threshold", self.distance_threshold),
            ("rotation multiplier", self.rotation_multiplier),
            ("max rotation", self.max_rotation),
            ("overlay fade start", self.overlay_fade_start),
            ("overlay fade end", self.overlay_fade_end),
            ("tap slop", self.tap_slop),
            ("tap velocity", self.tap_velocity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if self.overlay_fade_end <= self.overlay_fade_start {
            return Err(ConfigError::InvertedFade {
                fade_start: self.overlay_fade_start,
                fade_end: self.overlay_fade_end,
            });
        }
        if !(0.0..=1.0).contains(&self.overlay_max_opacity) {
            return Err(ConfigError::OpacityOutOfRange(self.overlay_max_opacity));
        }
        if !(self.grabbed_scale > 0.0 && self.grabbed_scale < 1.0) {
            return Err(ConfigError::GrabbedScaleOutOfRange(self.grabbed_scale));
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }

        for (name, spring) in [
            ("scale", &self.scale_spring),
            ("exit", &self.exit_spring),
            ("return", &self.return_spring),
        ] {
            if !spring.is_valid() {
                return Err(ConfigError::InvalidSpring {
                    name,
                    stiffness: spring.stiffness,
                    damping: spring.damping,
                    mass: spring.mass,
                });
            }
        }

        Ok(())
    }

    /// How far off-center an exiting card travels: 1.5x the larger viewport side.
    pub fn exit_distance(&self) -> f32 {
        1.5 * self.viewport_width.max(self.viewport_height)
    }
}
