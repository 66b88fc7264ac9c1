use bevy::prelude::*;
use swipe_deck::{ConfigError, SwipeConfig, SwipeDeckPlugin};

mod app;
mod cards;
mod entries;
mod feed;
mod screen;

use feed::FeedPlugin;
use screen::ScreenPlugin;

pub use entries::{EntryFeed, JournalEntry, Mood};
pub use feed::{FeedSettings, FeedStats};

pub fn run() -> Result<(), ConfigError> {
    let deck_plugin = SwipeDeckPlugin::new(SwipeConfig::default(), cards::render_entry)?;

    app::get_default_app(env!("CARGO_PKG_NAME"))
        .add_plugins(deck_plugin)
        .add_plugins(FeedPlugin)
        .add_plugins(ScreenPlugin)
        .add_systems(Startup, setup)
        .run();

    Ok(())
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
