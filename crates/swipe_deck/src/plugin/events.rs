use bevy::prelude::*;

use super::SwipeItem;
use crate::direction::{SwipeDirection, SwipeResult};

/// Gesture-level input for the top card, in screen pixels (y down) relative to
/// where the press began.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Grab,
    Move { offset: Vec2 },
    Release { offset: Vec2, velocity: Vec2 },
}

/// A card finished its exit animation.
#[derive(Event, Debug, Clone)]
pub struct SwipeEvent<T: SwipeItem> {
    pub item: T,
    pub result: SwipeResult,
}

#[derive(Event, Debug, Clone)]
pub struct TapEvent<T: SwipeItem> {
    pub item: T,
}

/// The deck ran low. Answer with `SwipeDeck::supply_more`.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NeedMoreEvent;

/// Haptic-style feedback: the drag just passed half the distance threshold.
#[derive(Event, Debug, Clone)]
pub struct ThresholdPulse {
    pub item_id: String,
    pub direction: SwipeDirection,
}
