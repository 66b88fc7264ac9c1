use core::time::Duration;

use bevy::input::touch::Touch;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::DeckLayout;
use super::events::PointerEvent;
use crate::velocity::VelocityTracker;

/// Which input owns a press. Touches are matched by id so another finger
/// lifting does not end the gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch(u64),
}

pub fn just_pressed_screen_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    window: &Window,
) -> Option<(PointerSource, Vec2)> {
    if button_input.just_pressed(MouseButton::Left) {
        window
            .cursor_position()
            .map(|position| (PointerSource::Mouse, position))
    } else {
        let touch = touch_input.iter_just_pressed().next()?;
        Some((PointerSource::Touch(touch.id()), touch.position()))
    }
}

pub fn held_screen_position(
    source: PointerSource,
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    window: &Window,
) -> Option<Vec2> {
    match source {
        PointerSource::Mouse if button_input.pressed(MouseButton::Left) => {
            window.cursor_position()
        }
        PointerSource::Mouse => None,
        PointerSource::Touch(id) => touch_input.get_pressed(id).map(Touch::position),
    }
}

pub fn just_released(
    source: PointerSource,
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
) -> bool {
    match source {
        PointerSource::Mouse => button_input.just_released(MouseButton::Left),
        PointerSource::Touch(id) => touch_input.just_released(id) || touch_input.just_canceled(id),
    }
}

pub fn just_released_screen_position(
    source: PointerSource,
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    window: &Window,
) -> Option<Vec2> {
    match source {
        PointerSource::Mouse if button_input.just_released(MouseButton::Left) => {
            window.cursor_position()
        }
        PointerSource::Mouse => None,
        PointerSource::Touch(id) => touch_input.get_released(id).map(Touch::position),
    }
}

/// The press currently driving the top card, if any.
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    origin: Option<Vec2>,
    source: PointerSource,
    last: Vec2,
    velocity: VelocityTracker,
}

impl PointerTracker {
    pub const fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    fn begin(&mut self, source: PointerSource, position: Vec2, now: Duration) {
        self.origin = Some(position);
        self.source = source;
        self.last = position;
        self.velocity.reset();
        self.velocity.push(position, now);
    }

    fn sample(&mut self, position: Vec2, now: Duration) {
        self.last = position;
        self.velocity.push(position, now);
    }

    /// Ends the gesture at `position`, returning the release to report.
    fn finish(&mut self, position: Vec2, now: Duration) -> Option<PointerEvent> {
        let origin = self.origin.take()?;
        self.sample(position, now);
        let release = PointerEvent::Release {
            offset: position - origin,
            velocity: self.velocity.velocity(),
        };
        self.velocity.reset();
        Some(release)
    }
}

/// Folds mouse and touch input into gesture events for the top card.
///
/// A press and its release may land in the same frame; both are reported, in
/// order.
pub fn collect_pointer_input(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    layout: Res<DeckLayout>,
    mut tracker: ResMut<PointerTracker>,
    mut pointer_events: EventWriter<PointerEvent>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let now = time.elapsed();

    if let Some((source, position)) = just_pressed_screen_position(&buttons, &touches, window) {
        if tracker.is_tracking() {
            // The previous release was never seen.
            let last = tracker.last;
            if let Some(release) = tracker.finish(last, now) {
                debug!("closing stale press before a new one");
                pointer_events.send(release);
            }
        }
        if layout.hits_top_card(position, window.size()) {
            tracker.begin(source, position, now);
            pointer_events.send(PointerEvent::Grab);
        }
    }

    let Some(origin) = tracker.origin else {
        return;
    };
    let source = tracker.source;

    if just_released(source, &buttons, &touches) {
        let position = just_released_screen_position(source, &buttons, &touches, window)
            .unwrap_or(tracker.last);
        if let Some(release) = tracker.finish(position, now) {
            pointer_events.send(release);
        }
        return;
    }

    if let Some(position) = held_screen_position(source, &buttons, &touches, window) {
        if position != tracker.last {
            tracker.sample(position, now);
            pointer_events.send(PointerEvent::Move {
                offset: position - origin,
            });
        }
    }
}
