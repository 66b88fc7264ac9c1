//! Bevy host integration: feeds pointer input into a [`SwipeEngine`], renders
//! the visible window as sprites and reports outcomes as events.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

mod cards;
mod events;
mod pointer;

pub use cards::{DeckCard, OverlayBadge};
pub use events::{NeedMoreEvent, PointerEvent, SwipeEvent, TapEvent, ThresholdPulse};
pub use pointer::PointerTracker;

use crate::config::SwipeConfig;
use crate::deck::{DeckEvent, DeckItem};
use crate::direction::SwipeDirection;
use crate::engine::SwipeEngine;
use crate::error::ConfigError;
use crate::session::{GestureOutcome, ReleaseOutcome};

/// Items a Bevy deck can hold.
pub trait SwipeItem: DeckItem + Clone + Send + Sync + 'static {}

impl<T: DeckItem + Clone + Send + Sync + 'static> SwipeItem for T {}

/// The deck and its gesture engine. Seed it with `initialize`, answer
/// [`NeedMoreEvent`] with `supply_more`.
#[derive(Resource, Deref, DerefMut, Debug)]
pub struct SwipeDeck<T: SwipeItem>(SwipeEngine<T>);

/// Builds the content of a card under its entity. The card background and
/// direction badges are added by the plugin.
#[derive(Resource)]
pub struct CardRenderer<T: SwipeItem>(pub fn(&mut ChildBuilder, &T));

/// Card geometry and colors, in logical pixels.
#[derive(Resource, Debug, Clone)]
pub struct DeckLayout {
    /// Size of every card, centered in the window
    pub card_size: Vec2,
    /// Background of every card
    pub card_color: Color,
    /// Depth of the top card. Lower ranks sit one unit below each other.
    pub base_depth: f32,
    pub badge_font_size: f32,
    pub like_color: Color,
    pub dislike_color: Color,
    pub superlike_color: Color,
    pub skip_color: Color,
}

impl Default for DeckLayout {
    fn default() -> Self {
        Self {
            card_size: Vec2::new(300.0, 440.0),
            card_color: Color::srgb(0.96, 0.94, 0.9),
            base_depth: 10.0,
            badge_font_size: 28.0,
            like_color: Color::srgb(0.2, 0.75, 0.35),
            dislike_color: Color::srgb(0.9, 0.25, 0.25),
            superlike_color: Color::srgb(0.25, 0.55, 0.95),
            skip_color: Color::srgb(0.55, 0.55, 0.55),
        }
    }
}

impl DeckLayout {
    pub const fn badge_color(&self, direction: SwipeDirection) -> Color {
        match direction {
            SwipeDirection::Right => self.like_color,
            SwipeDirection::Left => self.dislike_color,
            SwipeDirection::Up => self.superlike_color,
            SwipeDirection::Down => self.skip_color,
        }
    }

    /// Whether a screen position lands on the resting top card.
    pub fn hits_top_card(&self, position: Vec2, window_size: Vec2) -> bool {
        (position - window_size / 2.0)
            .abs()
            .cmple(self.card_size / 2.0)
            .all()
    }
}

/// Everything the plugin runs each frame. Order host systems after it to see
/// this frame's outcomes.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwipeDeckSet;

pub struct SwipeDeckPlugin<T: SwipeItem> {
    engine: SwipeEngine<T>,
    renderer: fn(&mut ChildBuilder, &T),
    layout: DeckLayout,
}

impl<T: SwipeItem> SwipeDeckPlugin<T> {
    pub fn new(
        config: SwipeConfig,
        renderer: fn(&mut ChildBuilder, &T),
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: SwipeEngine::new(config)?,
            renderer,
            layout: DeckLayout::default(),
        })
    }

    #[must_use]
    pub fn with_layout(mut self, layout: DeckLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl<T: SwipeItem> Plugin for SwipeDeckPlugin<T> {
    fn build(&self, app: &mut App) {
        app.insert_resource(SwipeDeck(self.engine.clone()))
            .insert_resource(CardRenderer(self.renderer))
            .insert_resource(self.layout.clone())
            .init_resource::<PointerTracker>()
            .add_event::<PointerEvent>()
            .add_event::<SwipeEvent<T>>()
            .add_event::<TapEvent<T>>()
            .add_event::<NeedMoreEvent>()
            .add_event::<ThresholdPulse>()
            .add_systems(
                Update,
                (
                    track_viewport::<T>,
                    pointer::collect_pointer_input,
                    drive_gestures::<T>,
                    tick_deck::<T>,
                    cards::sync_cards::<T>,
                    cards::apply_card_visuals::<T>,
                )
                    .chain()
                    .in_set(SwipeDeckSet),
            );
    }
}

fn track_viewport<T: SwipeItem>(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut deck: ResMut<SwipeDeck<T>>,
) {
    if let Ok(window) = windows.get_single() {
        deck.set_viewport(window.width(), window.height());
    }
}

fn drive_gestures<T: SwipeItem>(
    mut pointer_events: EventReader<PointerEvent>,
    mut deck: ResMut<SwipeDeck<T>>,
    mut swipes: EventWriter<SwipeEvent<T>>,
    mut taps: EventWriter<TapEvent<T>>,
    mut need_more: EventWriter<NeedMoreEvent>,
    mut pulses: EventWriter<ThresholdPulse>,
) {
    let mut signals: Vec<DeckEvent<T>> = Vec::new();
    for event in pointer_events.read() {
        match *event {
            PointerEvent::Grab => {
                if !deck.grab() {
                    debug!("grab refused in phase {}", deck.phase());
                }
            }
            PointerEvent::Move { offset } => deck.drag(offset, &mut signals),
            PointerEvent::Release { offset, velocity } => {
                let _: Option<ReleaseOutcome> = deck.release(offset, velocity, &mut signals);
            }
        }
    }
    emit(signals, &mut swipes, &mut taps, &mut need_more, &mut pulses);
}

fn tick_deck<T: SwipeItem>(
    time: Res<Time>,
    mut deck: ResMut<SwipeDeck<T>>,
    mut swipes: EventWriter<SwipeEvent<T>>,
    mut taps: EventWriter<TapEvent<T>>,
    mut need_more: EventWriter<NeedMoreEvent>,
    mut pulses: EventWriter<ThresholdPulse>,
) {
    if deck.session().is_none() {
        return;
    }
    let mut signals: Vec<DeckEvent<T>> = Vec::new();
    let _: Option<GestureOutcome> = deck.tick(time.delta_secs(), &mut signals);
    emit(signals, &mut swipes, &mut taps, &mut need_more, &mut pulses);
}

fn emit<T: SwipeItem>(
    signals: Vec<DeckEvent<T>>,
    swipes: &mut EventWriter<SwipeEvent<T>>,
    taps: &mut EventWriter<TapEvent<T>>,
    need_more: &mut EventWriter<NeedMoreEvent>,
    pulses: &mut EventWriter<ThresholdPulse>,
) {
    for signal in signals {
        match signal {
            DeckEvent::Swiped(item, result) => {
                info!("swiped {} {}", item.id(), result.direction);
                swipes.send(SwipeEvent { item, result });
            }
            DeckEvent::Tapped(item) => {
                taps.send(TapEvent { item });
            }
            DeckEvent::NeedMore => {
                need_more.send(NeedMoreEvent);
            }
            DeckEvent::ThresholdCrossed(item, direction) => {
                pulses.send(ThresholdPulse {
                    item_id: item.id().to_owned(),
                    direction,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use bevy::time::TimeUpdateStrategy;
    use bevy::window::WindowResolution;

    use super::*;
    use crate::controller::DragPhase;
    use crate::direction::SwipeAction;

    #[derive(Debug, Clone, PartialEq)]
    struct Note(String);

    impl DeckItem for Note {
        fn id(&self) -> &str {
            &self.0
        }
    }

    fn render(parent: &mut ChildBuilder, note: &Note) {
        parent.spawn(Text2d::new(note.0.clone()));
    }

    #[derive(Resource, Default)]
    struct Seen {
        swipes: Vec<(String, SwipeAction)>,
        distances: Vec<f32>,
        taps: Vec<String>,
        need_more: usize,
    }

    fn record(
        mut seen: ResMut<Seen>,
        mut swipes: EventReader<SwipeEvent<Note>>,
        mut taps: EventReader<TapEvent<Note>>,
        mut need_more: EventReader<NeedMoreEvent>,
    ) {
        for event in swipes.read() {
            seen.swipes.push((event.item.0.clone(), event.result.action));
            seen.distances.push(event.result.distance);
        }
        for event in taps.read() {
            seen.taps.push(event.item.0.clone());
        }
        seen.need_more += need_more.read().count();
    }

    fn app(ids: &[&str]) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Touches>()
            .init_resource::<Seen>()
            .add_plugins(
                SwipeDeckPlugin::new(SwipeConfig::default(), render).expect("valid config"),
            )
            .add_systems(Update, record.after(SwipeDeckSet));
        app.world_mut()
            .resource_mut::<SwipeDeck<Note>>()
            .initialize(ids.iter().map(|id| Note((*id).to_owned())));
        app.update();
        app
    }

    fn card_ranks(app: &mut App) -> Vec<(String, usize)> {
        let mut query = app.world_mut().query::<&DeckCard>();
        let mut ranks: Vec<(String, usize)> = query
            .iter(app.world())
            .map(|card| (card.item_id.clone(), card.rank))
            .collect();
        ranks.sort_by_key(|(_, rank)| *rank);
        ranks
    }

    fn run_frames(app: &mut App, frames: usize) {
        for _ in 0..frames {
            app.update();
        }
    }

    #[test]
    fn only_the_visible_window_is_materialized() {
        let mut app = app(&["a", "b", "c", "d", "e"]);
        run_frames(&mut app, 2);
        assert_eq!(
            card_ranks(&mut app),
            [("a".to_owned(), 0), ("b".to_owned(), 1), ("c".to_owned(), 2)],
            "three stacked cards"
        );
        let mut badges = app.world_mut().query::<&OverlayBadge>();
        assert_eq!(badges.iter(app.world()).count(), 12, "four badges per card");
    }

    #[test]
    fn flick_swipes_the_top_card_and_requests_more() {
        let mut app = app(&["a", "b", "c", "d"]);
        for event in [
            PointerEvent::Grab,
            PointerEvent::Move {
                offset: Vec2::new(50.0, 0.0),
            },
            PointerEvent::Release {
                offset: Vec2::new(50.0, 0.0),
                velocity: Vec2::new(1500.0, 0.0),
            },
        ] {
            assert!(
                app.world_mut().send_event(event).is_some(),
                "event queued"
            );
        }
        run_frames(&mut app, 150);

        let seen = app.world().resource::<Seen>();
        assert_eq!(seen.swipes, [("a".to_owned(), SwipeAction::Like)], "one like");
        assert_eq!(seen.need_more, 1, "three left after one swipe");
        assert!(seen.taps.is_empty(), "no taps");
        assert_eq!(
            card_ranks(&mut app),
            [("b".to_owned(), 0), ("c".to_owned(), 1), ("d".to_owned(), 2)],
            "window slid forward"
        );
    }

    #[test]
    fn tap_is_reported_and_card_stays() {
        let mut app = app(&["a", "b"]);
        assert!(
            app.world_mut().send_event(PointerEvent::Grab).is_some(),
            "event queued"
        );
        assert!(
            app.world_mut()
                .send_event(PointerEvent::Release {
                    offset: Vec2::new(2.0, 1.0),
                    velocity: Vec2::ZERO,
                })
                .is_some(),
            "event queued"
        );
        run_frames(&mut app, 30);

        let seen = app.world().resource::<Seen>();
        assert_eq!(seen.taps, ["a".to_owned()], "tap on the top card");
        assert!(seen.swipes.is_empty(), "no swipe");
        assert_eq!(
            app.world().resource::<SwipeDeck<Note>>().deck().cursor(),
            0,
            "cursor untouched"
        );
    }

    #[test]
    fn hit_test_covers_only_the_resting_top_card() {
        let layout = DeckLayout::default();
        let window = Vec2::new(360.0, 640.0);
        assert!(layout.hits_top_card(window / 2.0, window), "center");
        assert!(!layout.hits_top_card(Vec2::new(5.0, 5.0), window), "corner");
    }

    const CENTER: Vec2 = Vec2::new(180.0, 320.0);

    fn windowed_app(ids: &[&str]) -> App {
        let mut app = app(ids);
        let mut window = Window {
            resolution: WindowResolution::new(360.0, 640.0),
            ..default()
        };
        window.set_cursor_position(Some(CENTER));
        app.world_mut().spawn((window, PrimaryWindow));
        app.update();
        app
    }

    fn move_cursor(app: &mut App, position: Vec2) {
        let mut windows = app
            .world_mut()
            .query_filtered::<&mut Window, With<PrimaryWindow>>();
        windows
            .single_mut(app.world_mut())
            .set_cursor_position(Some(position));
    }

    /// Applies `input` to the left button for one frame.
    fn mouse_frame(app: &mut App, input: impl FnOnce(&mut ButtonInput<MouseButton>)) {
        input(&mut app.world_mut().resource_mut::<ButtonInput<MouseButton>>());
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
    }

    fn tap_in_one_frame(app: &mut App) {
        mouse_frame(app, |buttons| {
            buttons.press(MouseButton::Left);
            buttons.release(MouseButton::Left);
        });
    }

    fn is_tracking(app: &App) -> bool {
        app.world().resource::<PointerTracker>().is_tracking()
    }

    #[test]
    fn press_and_release_in_one_frame_is_a_tap() {
        let mut app = windowed_app(&["a", "b"]);
        tap_in_one_frame(&mut app);
        run_frames(&mut app, 90);

        assert_eq!(app.world().resource::<Seen>().taps, ["a".to_owned()], "one tap");
        assert!(!is_tracking(&app), "pointer freed");
        assert_eq!(
            app.world().resource::<SwipeDeck<Note>>().phase(),
            DragPhase::Idle,
            "card back at rest"
        );

        move_cursor(&mut app, CENTER + Vec2::new(130.0, 0.0));
        tap_in_one_frame(&mut app);
        run_frames(&mut app, 90);

        let seen = app.world().resource::<Seen>();
        assert_eq!(seen.taps, ["a".to_owned(), "a".to_owned()], "second tap");
        assert!(seen.swipes.is_empty(), "taps never add up to a swipe");
    }

    #[test]
    fn drag_offset_is_measured_from_the_press() {
        let mut app = windowed_app(&["a", "b"]);
        mouse_frame(&mut app, |buttons| buttons.press(MouseButton::Left));
        for step in 1..=4_u8 {
            move_cursor(&mut app, CENTER + Vec2::new(40.0 * f32::from(step), 0.0));
            app.update();
        }
        mouse_frame(&mut app, |buttons| buttons.release(MouseButton::Left));
        run_frames(&mut app, 150);

        let seen = app.world().resource::<Seen>();
        assert_eq!(seen.swipes, [("a".to_owned(), SwipeAction::Like)], "one like");
        assert_eq!(seen.distances.len(), 1, "one distance");
        assert!(
            (seen.distances[0] - 160.0).abs() < 1e-3,
            "offset {} from the press point",
            seen.distances[0]
        );
        assert!(seen.taps.is_empty(), "no taps");
    }

    #[test]
    fn press_outside_the_card_is_ignored() {
        let mut app = windowed_app(&["a"]);
        move_cursor(&mut app, Vec2::new(5.0, 5.0));
        mouse_frame(&mut app, |buttons| buttons.press(MouseButton::Left));

        assert!(!is_tracking(&app), "no gesture started");
        assert_eq!(
            app.world().resource::<SwipeDeck<Note>>().phase(),
            DragPhase::Idle,
            "no grab"
        );

        mouse_frame(&mut app, |buttons| buttons.release(MouseButton::Left));
        run_frames(&mut app, 30);
        assert!(app.world().resource::<Seen>().taps.is_empty(), "no tap");
    }

    #[test]
    fn new_press_closes_a_press_whose_release_was_lost() {
        let mut app = windowed_app(&["a", "b"]);
        mouse_frame(&mut app, |buttons| buttons.press(MouseButton::Left));
        assert!(is_tracking(&app), "first press tracked");

        mouse_frame(&mut app, |buttons| {
            buttons.reset(MouseButton::Left);
            buttons.press(MouseButton::Left);
        });
        assert_eq!(
            app.world().resource::<Seen>().taps,
            ["a".to_owned()],
            "stale press ends as a tap"
        );

        mouse_frame(&mut app, |buttons| buttons.release(MouseButton::Left));
        run_frames(&mut app, 90);
        assert!(!is_tracking(&app), "pointer freed");
        assert!(app.world().resource::<Seen>().swipes.is_empty(), "no swipe");
    }
}
