use bevy::math::Vec2;
use tracing::debug;

use crate::config::SwipeConfig;
use crate::controller::{AnimationEvent, CardAnimationController, DragPhase, Release};
use crate::direction::{SwipeDirection, SwipeResult};

/// How a release was classified, decided at the moment the finger lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Tap,
    /// The card is flying out. The result follows once the exit animation ends.
    Swipe(SwipeDirection),
    Return,
}

/// Reported when a card's animation finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    Swiped(SwipeResult),
    Returned,
}

/// One card's input binding: grab, moves, release, then animation until rest
/// or dismissal.
#[derive(Debug, Clone)]
pub struct GestureSession {
    item_id: String,
    controller: CardAnimationController,
    tap_slop: f32,
    tap_velocity: f32,
}

impl GestureSession {
    pub fn new(item_id: impl Into<String>, config: SwipeConfig) -> Self {
        Self {
            item_id: item_id.into(),
            tap_slop: config.tap_slop,
            tap_velocity: config.tap_velocity,
            controller: CardAnimationController::new(config),
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub const fn controller(&self) -> &CardAnimationController {
        &self.controller
    }

    pub fn phase(&self) -> DragPhase {
        self.controller.phase()
    }

    /// Exiting or returning: input is refused until the animation ends.
    pub fn is_animating(&self) -> bool {
        matches!(self.phase(), DragPhase::Exiting | DragPhase::Returning)
    }

    pub fn is_finished(&self) -> bool {
        self.controller.is_inert()
    }

    pub fn grab(&mut self) -> bool {
        self.controller.grab()
    }

    /// Returns a direction when the drag first crosses the feedback threshold.
    pub fn on_move(&mut self, offset: Vec2) -> Option<SwipeDirection> {
        self.controller.drag_to(offset)
    }

    pub fn release(&mut self, offset: Vec2, velocity: Vec2) -> Option<ReleaseOutcome> {
        if self.phase() != DragPhase::Dragging {
            return None;
        }

        if self.is_tap(offset, velocity) {
            debug!("tap on {}", self.item_id);
            let _: bool = self.controller.return_to_rest(offset, velocity);
            return Some(ReleaseOutcome::Tap);
        }

        self.controller
            .release(offset, velocity)
            .map(|release| match release {
                Release::Exiting(direction) => ReleaseOutcome::Swipe(direction),
                Release::Returning => ReleaseOutcome::Return,
            })
    }

    pub fn tick(&mut self, dt: f32) -> Option<GestureOutcome> {
        self.controller.tick(dt).map(|event| match event {
            AnimationEvent::Exited(result) => GestureOutcome::Swiped(result),
            AnimationEvent::Settled => GestureOutcome::Returned,
        })
    }

    fn is_tap(&self, offset: Vec2, velocity: Vec2) -> bool {
        offset.length() < self.tap_slop && velocity.length() < self.tap_velocity
    }
}
