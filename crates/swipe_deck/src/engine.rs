//! The deck and the gesture session for its top card, driven as one unit.

use bevy::math::Vec2;
use tracing::debug;

use crate::classifier::OverlayOpacity;
use crate::config::SwipeConfig;
use crate::controller::DragPhase;
use crate::deck::{CardDeck, DeckItem, DeckObserver};
use crate::error::ConfigError;
use crate::rank::{RankStyle, rank_style};
use crate::session::{GestureOutcome, GestureSession, ReleaseOutcome};

/// How one card of the visible window should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisual {
    pub rank: usize,
    /// Screen-space offset from the card's resting spot (y grows downward)
    pub offset: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub opacity: f32,
    pub overlays: OverlayOpacity,
    /// Only the top card takes input
    pub interactive: bool,
}

impl CardVisual {
    fn ranked(rank: usize, style: RankStyle) -> Self {
        Self {
            rank,
            offset: Vec2::new(0.0, style.offset_y),
            scale: style.scale,
            rotation: 0.0,
            opacity: style.opacity,
            overlays: OverlayOpacity::default(),
            interactive: rank == 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwipeEngine<T> {
    config: SwipeConfig,
    deck: CardDeck<T>,
    /// Bound to the top card from its first grab until it is dismissed
    session: Option<GestureSession>,
}

impl<T: DeckItem> SwipeEngine<T> {
    pub fn new(config: SwipeConfig) -> Result<Self, ConfigError> {
        let deck = CardDeck::new(&config)?;
        Ok(Self {
            config,
            deck,
            session: None,
        })
    }

    pub const fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub const fn deck(&self) -> &CardDeck<T> {
        &self.deck
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map_or(DragPhase::Idle, GestureSession::phase)
    }

    /// Applies to gestures started after the call.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.config.viewport_width = width;
            self.config.viewport_height = height;
        }
    }

    /// Re-seeds the deck. Any in-flight animation is abandoned.
    pub fn initialize(&mut self, items: impl IntoIterator<Item = T>) {
        self.session = None;
        self.deck.initialize(items);
    }

    pub fn supply_more(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        self.deck.supply_more(items)
    }

    /// Binds (or re-binds) a session to the top card and starts a drag.
    /// Refused on an empty deck and while the top card is animating.
    pub fn grab(&mut self) -> bool {
        let Some(top) = self.deck.top() else {
            debug!("grab on an empty deck");
            return false;
        };

        let stale = self
            .session
            .as_ref()
            .is_none_or(|session| session.item_id() != top.id() || session.is_finished());
        if stale {
            self.session = Some(GestureSession::new(top.id(), self.config.clone()));
        }

        self.session.as_mut().is_some_and(GestureSession::grab)
    }

    pub fn drag(&mut self, offset: Vec2, observer: &mut impl DeckObserver<T>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(direction) = session.on_move(offset) else {
            return;
        };
        if let Some(item) = self.deck.top() {
            observer.on_threshold_crossed(item, direction);
        }
    }

    pub fn release(
        &mut self,
        offset: Vec2,
        velocity: Vec2,
        observer: &mut impl DeckObserver<T>,
    ) -> Option<ReleaseOutcome> {
        let outcome = self.session.as_mut()?.release(offset, velocity)?;
        if outcome == ReleaseOutcome::Tap {
            self.deck.report_tap(observer);
        }
        Some(outcome)
    }

    /// Advances animations by `dt` seconds. A finished exit reports the swipe
    /// and moves the deck forward.
    pub fn tick(&mut self, dt: f32, observer: &mut impl DeckObserver<T>) -> Option<GestureOutcome> {
        let outcome = self.session.as_mut()?.tick(dt)?;
        if let GestureOutcome::Swiped(result) = outcome {
            let _: bool = self.deck.complete_swipe(&result, observer);
            self.session = None;
        }
        Some(outcome)
    }

    /// The visible window, top card first, with how each card should look.
    pub fn cards(&self) -> impl Iterator<Item = (&T, CardVisual)> {
        let top_pose = self.session.as_ref().map(|session| session.controller().pose());
        self.deck
            .visible_window()
            .iter()
            .enumerate()
            .map(move |(rank, item)| {
                let visual = match top_pose {
                    Some(pose) if rank == 0 => CardVisual {
                        offset: pose.offset,
                        scale: pose.scale,
                        rotation: pose.rotation,
                        overlays: pose.overlays,
                        ..CardVisual::ranked(0, RankStyle::TOP)
                    },
                    _ => CardVisual::ranked(rank, rank_style(rank)),
                };
                (item, visual)
            })
    }
}
