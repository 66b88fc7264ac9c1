//! Swipe-card deck engine: direction classification, drag physics, exit and
//! return animation, and an append-only candidate queue with replenishment.
//!
//! The engine is framework-free apart from `bevy::math`; the [`plugin`]
//! module wires it into a Bevy app.

pub mod classifier;
pub mod config;
pub mod controller;
pub mod deck;
pub mod direction;
pub mod engine;
pub mod error;
pub mod plugin;
pub mod rank;
pub mod session;
pub mod spring;
pub mod velocity;

pub use config::SwipeConfig;
pub use controller::{CardAnimationController, CardPose, DragPhase};
pub use deck::{CardDeck, DeckEvent, DeckItem, DeckObserver};
pub use direction::{SwipeAction, SwipeDirection, SwipeResult};
pub use engine::{CardVisual, SwipeEngine};
pub use error::ConfigError;
pub use plugin::{SwipeDeck, SwipeDeckPlugin, SwipeDeckSet};
pub use session::{GestureOutcome, GestureSession, ReleaseOutcome};
