use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// One of the four cardinal swipe directions. Diagonals are never produced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// The business action bound to a direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Like,
    Dislike,
    Superlike,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl SwipeDirection {
    pub const fn action(self) -> SwipeAction {
        match self {
            Self::Right => SwipeAction::Like,
            Self::Left => SwipeAction::Dislike,
            Self::Up => SwipeAction::Superlike,
            Self::Down => SwipeAction::Skip,
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// +1 for right/down, -1 for left/up, in screen coordinates (y grows downward).
    pub const fn sign(self) -> f32 {
        match self {
            Self::Right | Self::Down => 1.0,
            Self::Left | Self::Up => -1.0,
        }
    }
}

impl SwipeAction {
    pub const fn direction(self) -> SwipeDirection {
        match self {
            Self::Like => SwipeDirection::Right,
            Self::Dislike => SwipeDirection::Left,
            Self::Superlike => SwipeDirection::Up,
            Self::Skip => SwipeDirection::Down,
        }
    }
}

impl From<SwipeDirection> for SwipeAction {
    fn from(direction: SwipeDirection) -> Self {
        direction.action()
    }
}

/// Terminal outcome of a completed swipe.
///
/// `velocity` and `distance` are signed projections on the axis of
/// `direction`, not vector magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeResult {
    pub direction: SwipeDirection,
    pub action: SwipeAction,
    pub velocity: f32,
    pub distance: f32,
}

impl SwipeResult {
    pub const fn new(direction: SwipeDirection, velocity: f32, distance: f32) -> Self {
        Self {
            direction,
            action: direction.action(),
            velocity,
            distance,
        }
    }
}
