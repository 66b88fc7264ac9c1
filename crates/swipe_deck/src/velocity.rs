use core::time::Duration;
use std::collections::VecDeque;

use bevy::math::Vec2;
use tracing::trace;

/// Only samples this recent contribute to the release velocity.
const HORIZON: Duration = Duration::from_millis(100);

/// A pointer that has not moved for this long is considered stopped.
const ASSUME_STOPPED: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy)]
struct Sample {
    position: Vec2,
    timestamp: Duration,
}

/// Estimates pointer velocity (pixels per second) from recent positions.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    history: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn push(&mut self, position: Vec2, timestamp: Duration) {
        if let Some(last) = self.history.back() {
            if timestamp < last.timestamp {
                trace!(
                    "ignoring sample at {timestamp:?}, earlier than {:?}",
                    last.timestamp
                );
                return;
            }
        }

        self.history.push_back(Sample {
            position,
            timestamp,
        });
        self.trim();
    }

    pub fn velocity(&self) -> Vec2 {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return Vec2::ZERO;
        };

        let stopped = self
            .history
            .iter()
            .rev()
            .nth(1)
            .is_some_and(|previous| last.timestamp - previous.timestamp > ASSUME_STOPPED);
        if stopped {
            return Vec2::ZERO;
        }

        let elapsed = (last.timestamp - first.timestamp).as_secs_f32();
        if elapsed <= 0.0 {
            return Vec2::ZERO;
        }
        (last.position - first.position) / elapsed
    }

    fn trim(&mut self) {
        let Some(&Sample { timestamp, .. }) = self.history.back() else {
            return;
        };

        while let Some(first) = self.history.front() {
            if timestamp <= first.timestamp + HORIZON {
                break;
            }
            let _: Option<Sample> = self.history.pop_front();
        }
    }
}
