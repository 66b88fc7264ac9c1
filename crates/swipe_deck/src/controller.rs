//! Drag/exit/return state machine for the interactive card.

use bevy::math::Vec2;
use strum::Display;
use tracing::{debug, trace};

use crate::classifier::{self, OverlayOpacity};
use crate::config::SwipeConfig;
use crate::direction::{Axis, SwipeDirection, SwipeResult};
use crate::spring::{Rest, SpringMotion, SpringMotion2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DragPhase {
    Idle,
    Dragging,
    Exiting,
    Returning,
    /// The card has left the screen. The controller accepts nothing further.
    Dismissed,
}

/// What a release turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Exiting(SwipeDirection),
    Returning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// The exit animation finished. Emitted once per controller.
    Exited(SwipeResult),
    /// The card is back at rest and may be grabbed again.
    Settled,
}

/// Everything needed to draw the interactive card for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub offset: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub overlays: OverlayOpacity,
}

#[derive(Debug, Clone)]
pub struct CardAnimationController {
    config: SwipeConfig,
    phase: DragPhase,
    /// Gesture-local offset, zeroed on every grab
    offset: Vec2,
    scale: f32,
    /// Seconds since the current motions started
    elapsed: f32,
    motion: Option<SpringMotion2>,
    scale_motion: Option<SpringMotion>,
    pending: Option<SwipeResult>,
    pulse_fired: bool,
}

impl CardAnimationController {
    pub const fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            phase: DragPhase::Idle,
            offset: Vec2::ZERO,
            scale: 1.0,
            elapsed: 0.0,
            motion: None,
            scale_motion: None,
            pending: None,
            pulse_fired: false,
        }
    }

    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    pub const fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_inert(&self) -> bool {
        self.phase == DragPhase::Dismissed
    }

    pub fn pose(&self) -> CardPose {
        CardPose {
            offset: self.offset,
            scale: self.scale,
            rotation: classifier::rotation_angle(
                self.offset.x,
                self.config.rotation_multiplier,
                self.config.max_rotation,
            ),
            overlays: OverlayOpacity::from_offset(self.offset, &self.config),
        }
    }

    /// Starts a drag from zero offset. Only an idle card can be grabbed.
    pub fn grab(&mut self) -> bool {
        if self.phase != DragPhase::Idle {
            debug!("grab ignored while {}", self.phase);
            return false;
        }

        self.phase = DragPhase::Dragging;
        self.offset = Vec2::ZERO;
        self.motion = None;
        self.pulse_fired = false;
        self.restart_scale(self.config.grabbed_scale);
        true
    }

    /// Follows the finger 1:1. Returns the direction the first time the drag
    /// reaches half the distance threshold in this gesture.
    pub fn drag_to(&mut self, offset: Vec2) -> Option<SwipeDirection> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        self.offset = offset;

        if self.pulse_fired {
            return None;
        }
        let direction = classifier::classify_by_distance(offset.x, offset.y)?;
        let crossed = classifier::is_complete(
            0.0,
            classifier::project(offset, direction),
            f32::INFINITY,
            self.config.distance_threshold / 2.0,
        );
        if crossed {
            trace!("threshold crossed toward {direction}");
            self.pulse_fired = true;
            return Some(direction);
        }
        None
    }

    /// Ends the drag, flinging the card off screen if the swipe completed.
    pub fn release(&mut self, offset: Vec2, velocity: Vec2) -> Option<Release> {
        if self.phase != DragPhase::Dragging {
            debug!("release ignored while {}", self.phase);
            return None;
        }
        self.offset = offset;

        let completed = classifier::resolve_direction(offset, velocity, self.config.velocity_threshold)
            .map(|direction| {
                SwipeResult::new(
                    direction,
                    classifier::project(velocity, direction),
                    classifier::project(offset, direction),
                )
            })
            .filter(|result| {
                classifier::is_complete(
                    result.velocity,
                    result.distance,
                    self.config.velocity_threshold,
                    self.config.distance_threshold,
                )
            });

        match completed {
            Some(result) => {
                self.start_exit(result, velocity);
                Some(Release::Exiting(result.direction))
            }
            None => {
                self.start_return(velocity);
                Some(Release::Returning)
            }
        }
    }

    /// Ends the drag without considering a swipe.
    pub fn return_to_rest(&mut self, offset: Vec2, velocity: Vec2) -> bool {
        if self.phase != DragPhase::Dragging {
            return false;
        }
        self.offset = offset;
        self.start_return(velocity);
        true
    }

    /// Advances running motions by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Option<AnimationEvent> {
        if matches!(self.phase, DragPhase::Idle | DragPhase::Dismissed) && self.scale_motion.is_none() {
            return None;
        }
        self.elapsed += dt.max(0.0);

        if let Some(motion) = self.scale_motion {
            self.scale = motion.position(self.elapsed);
            if self.phase != DragPhase::Dragging && motion.is_settled(self.elapsed, Rest::SCALE) {
                self.scale = motion.target();
                self.scale_motion = None;
            }
        }

        let motion = self.motion?;
        self.offset = motion.position(self.elapsed);
        if !motion.is_settled(self.elapsed, Rest::POSITION) {
            return None;
        }

        self.offset = motion.target();
        self.motion = None;
        self.scale = 1.0;
        self.scale_motion = None;

        match self.phase {
            DragPhase::Exiting => {
                debug!("exit finished after {:.3}s", self.elapsed);
                self.phase = DragPhase::Dismissed;
                self.pending.take().map(AnimationEvent::Exited)
            }
            DragPhase::Returning => {
                debug!("returned to rest after {:.3}s", self.elapsed);
                self.phase = DragPhase::Idle;
                Some(AnimationEvent::Settled)
            }
            _ => None,
        }
    }

    fn start_exit(&mut self, result: SwipeResult, velocity: Vec2) {
        // A card dragged past the exit point keeps going outward.
        let reach = result.direction.sign()
            * self.config.exit_distance().max(result.distance.abs());
        let target = match result.direction.axis() {
            Axis::Horizontal => Vec2::new(reach, self.offset.y),
            Axis::Vertical => Vec2::new(self.offset.x, reach),
        };
        debug!(
            "swipe {} completed (velocity {:.0}, distance {:.0})",
            result.direction, result.velocity, result.distance
        );

        self.phase = DragPhase::Exiting;
        self.pending = Some(result);
        self.motion = Some(SpringMotion2::new(
            self.config.exit_spring,
            self.offset,
            target,
            velocity,
        ));
        self.restart_scale(1.0);
    }

    fn start_return(&mut self, velocity: Vec2) {
        self.phase = DragPhase::Returning;
        self.motion = Some(SpringMotion2::new(
            self.config.return_spring,
            self.offset,
            Vec2::ZERO,
            velocity,
        ));
        self.restart_scale(1.0);
    }

    fn restart_scale(&mut self, target: f32) {
        self.elapsed = 0.0;
        self.scale_motion = Some(SpringMotion::new(
            self.config.scale_spring,
            self.scale,
            target,
            0.0,
        ));
    }
}
