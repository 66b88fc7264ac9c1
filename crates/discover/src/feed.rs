use bevy::prelude::*;
use swipe_deck::plugin::{NeedMoreEvent, SwipeEvent, TapEvent, ThresholdPulse};
use swipe_deck::{SwipeAction, SwipeDeck, SwipeDeckSet};

use crate::entries::{EntryFeed, JournalEntry};

/// Tunables of the mock entry service
#[derive(Resource, Debug, Clone)]
pub struct FeedSettings {
    /// Fresh entries per page
    pub batch_size: usize,
    /// Entries of the previous page repeated at the start of the next
    pub overlap: usize,
    /// Simulated round trip of a page request (seconds)
    pub fetch_delay: f32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            batch_size: 6,
            overlap: 2,
            fetch_delay: 0.6,
        }
    }
}

/// Reactions recorded so far in this session.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedStats {
    pub likes: u32,
    pub dislikes: u32,
    pub superlikes: u32,
    pub skips: u32,
    pub taps: u32,
}

impl FeedStats {
    pub fn record(&mut self, action: SwipeAction) {
        match action {
            SwipeAction::Like => self.likes += 1,
            SwipeAction::Dislike => self.dislikes += 1,
            SwipeAction::Superlike => self.superlikes += 1,
            SwipeAction::Skip => self.skips += 1,
        }
    }

    pub const fn swiped(&self) -> u32 {
        self.likes + self.dislikes + self.superlikes + self.skips
    }
}

/// A page request in flight.
#[derive(Resource, Debug, Default)]
pub struct PendingFetch(pub Option<Timer>);

pub struct FeedPlugin;

impl Plugin for FeedPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<FeedSettings>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(EntryFeed::new(settings.batch_size, settings.overlap))
            .insert_resource(settings)
            .init_resource::<FeedStats>()
            .init_resource::<PendingFetch>()
            .add_systems(Startup, seed_deck)
            .add_systems(
                Update,
                (
                    request_more,
                    deliver_page,
                    record_reactions,
                    open_tapped_entries,
                    log_pulses,
                )
                    .chain()
                    .after(SwipeDeckSet),
            );
    }
}

fn seed_deck(mut feed: ResMut<EntryFeed>, mut deck: ResMut<SwipeDeck<JournalEntry>>) {
    deck.initialize(feed.next_batch());
}

fn request_more(
    mut need_more: EventReader<NeedMoreEvent>,
    settings: Res<FeedSettings>,
    mut pending: ResMut<PendingFetch>,
) {
    if need_more.read().count() == 0 || pending.0.is_some() {
        return;
    }
    info!("requesting another page of entries");
    pending.0 = Some(Timer::from_seconds(settings.fetch_delay, TimerMode::Once));
}

fn deliver_page(
    time: Res<Time>,
    mut pending: ResMut<PendingFetch>,
    mut feed: ResMut<EntryFeed>,
    mut deck: ResMut<SwipeDeck<JournalEntry>>,
) {
    let Some(timer) = &mut pending.0 else {
        return;
    };
    if !timer.tick(time.delta()).finished() {
        return;
    }
    pending.0 = None;

    let added = deck.supply_more(feed.next_batch());
    info!("page delivered, {added} new entries");
}

fn record_reactions(
    mut swipes: EventReader<SwipeEvent<JournalEntry>>,
    mut stats: ResMut<FeedStats>,
) {
    for SwipeEvent { item, result } in swipes.read() {
        info!(
            "{} entry {} ({:.0}px, {:.0}px/s)",
            result.action, item.id, result.distance, result.velocity
        );
        stats.record(result.action);
    }
}

fn open_tapped_entries(mut taps: EventReader<TapEvent<JournalEntry>>, mut stats: ResMut<FeedStats>) {
    for TapEvent { item } in taps.read() {
        info!("opening entry {}: {}", item.id, item.body);
        stats.taps += 1;
    }
}

fn log_pulses(mut pulses: EventReader<ThresholdPulse>) {
    for pulse in pulses.read() {
        debug!("feedback pulse on {} toward {}", pulse.item_id, pulse.direction);
    }
}
