use bevy::prelude::*;
use swipe_deck::SwipeDeck;

use crate::entries::JournalEntry;
use crate::feed::{FeedStats, PendingFetch};

#[derive(Component)]
pub struct StatsText;

#[derive(Component)]
pub struct EmptyState;

pub struct ScreenPlugin;

impl Plugin for ScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_screen)
            .add_systems(Update, (update_stats, update_empty_state));
    }
}

fn spawn_screen(mut commands: Commands) {
    commands.spawn((
        StatsText,
        Text2d::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0.0, 290.0, 50.0),
    ));

    commands.spawn((
        EmptyState,
        Text2d::new("You're all caught up"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0.0, 0.0, 0.0),
        Visibility::Hidden,
    ));
}

fn update_stats(stats: Res<FeedStats>, mut query: Query<&mut Text2d, With<StatsText>>) {
    if !stats.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = format!(
            "Liked {}  Passed {}  Loved {}  Skipped {}",
            stats.likes, stats.dislikes, stats.superlikes, stats.skips
        );
    }
}

fn update_empty_state(
    deck: Res<SwipeDeck<JournalEntry>>,
    pending: Res<PendingFetch>,
    mut query: Query<(&mut Visibility, &mut Text2d), With<EmptyState>>,
) {
    let empty = deck.deck().is_empty();
    for (mut visibility, mut text) in &mut query {
        let wanted = if empty {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }

        let message = if pending.0.is_some() {
            "Loading more entries..."
        } else {
            "You're all caught up"
        };
        if empty && text.0 != message {
            message.clone_into(&mut text.0);
        }
    }
}
