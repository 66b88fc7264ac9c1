//! Append-only candidate queue with a monotonic read cursor.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::SwipeConfig;
use crate::direction::{SwipeDirection, SwipeResult};
use crate::error::ConfigError;

/// Anything the host wants users to swipe on. Only the id matters here.
pub trait DeckItem {
    fn id(&self) -> &str;
}

/// Receives what the deck reports back to the host. Every method defaults to
/// doing nothing.
pub trait DeckObserver<T> {
    /// Fired once per completed swipe, after the exit animation.
    fn on_swipe(&mut self, _item: &T, _result: &SwipeResult) {}

    fn on_tap(&mut self, _item: &T) {}

    /// Fired at most once per crossing of the replenish threshold.
    fn on_need_more(&mut self) {}

    /// One-shot feedback when a drag reaches half the distance threshold.
    fn on_threshold_crossed(&mut self, _item: &T, _direction: SwipeDirection) {}
}

impl<T> DeckObserver<T> for () {}

/// Owned record of one observer callback.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent<T> {
    Swiped(T, SwipeResult),
    Tapped(T),
    NeedMore,
    ThresholdCrossed(T, SwipeDirection),
}

impl<T: Clone> DeckObserver<T> for Vec<DeckEvent<T>> {
    fn on_swipe(&mut self, item: &T, result: &SwipeResult) {
        self.push(DeckEvent::Swiped(item.clone(), *result));
    }

    fn on_tap(&mut self, item: &T) {
        self.push(DeckEvent::Tapped(item.clone()));
    }

    fn on_need_more(&mut self) {
        self.push(DeckEvent::NeedMore);
    }

    fn on_threshold_crossed(&mut self, item: &T, direction: SwipeDirection) {
        self.push(DeckEvent::ThresholdCrossed(item.clone(), direction));
    }
}

#[derive(Debug, Clone)]
pub struct CardDeck<T> {
    queue: Vec<T>,
    /// Index of the top card. Only ever increases.
    cursor: usize,
    visible_count: usize,
    min_threshold: usize,
    /// Every id ever queued in this deck, swiped or not
    seen_ids: HashSet<String>,
    /// Cleared when need-more fires, set again by the next replenishment
    need_more_armed: bool,
}

impl<T: DeckItem> CardDeck<T> {
    pub fn new(config: &SwipeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            queue: Vec::new(),
            cursor: 0,
            visible_count: config.visible_count,
            min_threshold: config.min_threshold,
            seen_ids: HashSet::new(),
            need_more_armed: true,
        })
    }

    pub fn with_items(
        config: &SwipeConfig,
        items: impl IntoIterator<Item = T>,
    ) -> Result<Self, ConfigError> {
        let mut deck = Self::new(config)?;
        deck.initialize(items);
        Ok(deck)
    }

    /// Seeds the deck, starting a fresh lifetime: queue, cursor and seen ids
    /// are reset before the items go in.
    pub fn initialize(&mut self, items: impl IntoIterator<Item = T>) {
        self.queue.clear();
        self.cursor = 0;
        self.seen_ids.clear();
        self.need_more_armed = true;
        let added = self.append(items);
        info!("deck initialized with {added} items");
    }

    /// Appends a replenishment batch, dropping ids the deck has already seen.
    /// Returns how many items were appended.
    pub fn supply_more(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let added = self.append(items);
        self.need_more_armed = true;
        info!(
            "deck replenished with {added} items ({} remaining)",
            self.remaining()
        );
        added
    }

    pub fn visible_window(&self) -> &[T] {
        let end = (self.cursor + self.visible_count).min(self.queue.len());
        self.queue.get(self.cursor..end).unwrap_or_default()
    }

    pub fn top(&self) -> Option<&T> {
        self.queue.get(self.cursor)
    }

    pub fn is_empty(&self) -> bool {
        self.top().is_none()
    }

    /// Items at or after the cursor.
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.cursor)
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn queue(&self) -> &[T] {
        &self.queue
    }

    pub const fn seen_ids(&self) -> &HashSet<String> {
        &self.seen_ids
    }

    pub const fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Reports the swipe of the top card, then moves the cursor past it.
    /// Returns `false` on an empty deck.
    pub fn complete_swipe(
        &mut self,
        result: &SwipeResult,
        observer: &mut impl DeckObserver<T>,
    ) -> bool {
        let Some(item) = self.queue.get(self.cursor) else {
            debug!("swipe reported on an empty deck");
            return false;
        };
        observer.on_swipe(item, result);
        self.cursor += 1;

        if self.need_more_armed && self.remaining() <= self.min_threshold {
            self.need_more_armed = false;
            info!("{} items remaining, requesting more", self.remaining());
            observer.on_need_more();
        }
        true
    }

    pub fn report_tap(&self, observer: &mut impl DeckObserver<T>) {
        if let Some(item) = self.top() {
            observer.on_tap(item);
        }
    }

    fn append(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let before = self.queue.len();
        for item in items {
            if self.seen_ids.insert(item.id().to_owned()) {
                self.queue.push(item);
            } else {
                debug!("dropping duplicate item {}", item.id());
            }
        }
        self.queue.len() - before
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(String);

    impl DeckItem for Item {
        fn id(&self) -> &str {
            &self.0
        }
    }

    fn items(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| Item((*id).to_owned())).collect()
    }

    fn ids(deck: &CardDeck<Item>) -> Vec<&str> {
        deck.queue().iter().map(DeckItem::id).collect()
    }

    fn like() -> SwipeResult {
        SwipeResult::new(SwipeDirection::Right, 1500.0, 50.0)
    }

    #[test]
    fn window_is_the_next_cards_from_the_cursor() {
        let mut deck =
            CardDeck::with_items(&SwipeConfig::default(), items(&["a", "b", "c", "d", "e"]))
                .expect("valid config");
        let window: Vec<&str> = deck.visible_window().iter().map(DeckItem::id).collect();
        assert_eq!(window, ["a", "b", "c"], "first three");

        let mut events = Vec::new();
        assert!(deck.complete_swipe(&like(), &mut events), "advanced");
        let window: Vec<&str> = deck.visible_window().iter().map(DeckItem::id).collect();
        assert_eq!(window, ["b", "c", "d"], "slid by one");
        assert_eq!(deck.cursor(), 1, "cursor moved");
    }

    #[test]
    fn need_more_fires_after_first_swipe_of_four() {
        let mut deck =
            CardDeck::with_items(&SwipeConfig::default(), items(&["a", "b", "c", "d"]))
                .expect("valid config");
        let mut events = Vec::new();
        assert!(deck.complete_swipe(&like(), &mut events), "advanced");
        assert_eq!(
            events,
            vec![
                DeckEvent::Swiped(Item("a".to_owned()), like()),
                DeckEvent::NeedMore
            ],
            "swipe then need-more"
        );
    }

    #[test]
    fn need_more_fires_once_per_crossing() {
        let mut deck = CardDeck::with_items(
            &SwipeConfig::default(),
            items(&["a", "b", "c", "d", "e", "f"]),
        )
        .expect("valid config");
        let mut events = Vec::new();
        for _ in 0..6 {
            let _: bool = deck.complete_swipe(&like(), &mut events);
        }
        let requests = events.iter().filter(|e| **e == DeckEvent::NeedMore).count();
        assert_eq!(requests, 1, "one request until the host answers");

        let _: usize = deck.supply_more(items(&["g"]));
        let _: bool = deck.complete_swipe(&like(), &mut events);
        let requests = events.iter().filter(|e| **e == DeckEvent::NeedMore).count();
        assert_eq!(requests, 2, "re-armed by replenishment");
    }

    #[test]
    fn replenishment_skips_seen_ids() {
        let mut deck =
            CardDeck::with_items(&SwipeConfig::default(), items(&["a", "b", "c"]))
                .expect("valid config");
        let mut events = Vec::new();
        let _: bool = deck.complete_swipe(&like(), &mut events);

        assert_eq!(deck.supply_more(items(&["b", "e", "a", "e"])), 1, "only e is new");
        assert_eq!(ids(&deck), ["a", "b", "c", "e"], "append only");
        assert!(deck.seen_ids().contains("a"), "swiped ids stay seen");
    }

    #[test]
    fn empty_deck_is_a_valid_state() {
        let mut deck: CardDeck<Item> =
            CardDeck::new(&SwipeConfig::default()).expect("valid config");
        assert!(deck.is_empty(), "nothing queued");
        assert!(deck.visible_window().is_empty(), "empty window");
        let mut events = Vec::new();
        assert!(!deck.complete_swipe(&like(), &mut events), "nothing to swipe");
        deck.report_tap(&mut events);
        assert!(events.is_empty(), "no callbacks");
    }

    #[test]
    fn initialize_starts_a_new_lifetime() {
        let mut deck =
            CardDeck::with_items(&SwipeConfig::default(), items(&["a", "a", "b"]))
                .expect("valid config");
        assert_eq!(ids(&deck), ["a", "b"], "duplicates within the seed dropped");
        deck.initialize(items(&["a"]));
        assert_eq!(deck.cursor(), 0, "cursor reset");
        assert_eq!(ids(&deck), ["a"], "seed replaced");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SwipeConfig {
            min_threshold: 5,
            ..SwipeConfig::default()
        };
        assert!(CardDeck::<Item>::new(&config).is_err(), "threshold past window");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Supply(Vec<u8>),
        Swipe,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            proptest::collection::vec(0u8..24, 0..6).prop_map(Op::Supply),
            Just(Op::Swipe),
        ]
    }

    proptest! {
        #[test]
        fn queue_never_repeats_and_cursor_never_rewinds(
            seed in proptest::collection::vec(0u8..24, 0..6),
            ops in proptest::collection::vec(op(), 0..40),
        ) {
            let to_items = |raw: &[u8]| raw.iter().map(|n| Item(n.to_string())).collect::<Vec<_>>();
            let mut deck = CardDeck::with_items(&SwipeConfig::default(), to_items(&seed))
                .map_err(|error| TestCaseError::fail(error.to_string()))?;
            let mut events = Vec::new();
            let mut last_cursor = deck.cursor();

            for op in ops {
                match op {
                    Op::Supply(raw) => { let _: usize = deck.supply_more(to_items(&raw)); }
                    Op::Swipe => { let _: bool = deck.complete_swipe(&like(), &mut events); }
                }
                prop_assert!(deck.cursor() >= last_cursor);
                prop_assert!(deck.cursor() <= deck.queue().len());
                last_cursor = deck.cursor();

                prop_assert!(deck.seen_ids().len() >= deck.queue().len());
                let unique: HashSet<&str> = deck.queue().iter().map(DeckItem::id).collect();
                prop_assert_eq!(unique.len(), deck.queue().len());
                prop_assert!(deck.visible_window().len() <= deck.visible_count());
            }
        }
    }
}
