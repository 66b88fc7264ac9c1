use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use strum::IntoEnumIterator;

use super::{CardRenderer, DeckLayout, SwipeDeck, SwipeItem};
use crate::deck::DeckItem;
use crate::direction::SwipeDirection;
use crate::engine::CardVisual;

/// A materialized card of the visible window.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct DeckCard {
    pub item_id: String,
    pub rank: usize,
}

/// Direction label on a card, faded in as the drag heads its way.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayBadge(pub SwipeDirection);

/// Spawns cards entering the window and despawns the ones that left it.
pub fn sync_cards<T: SwipeItem>(
    mut commands: Commands,
    deck: Res<SwipeDeck<T>>,
    renderer: Res<CardRenderer<T>>,
    layout: Res<DeckLayout>,
    mut cards: Query<(Entity, &mut DeckCard)>,
) {
    let window: Vec<&T> = deck.deck().visible_window().iter().collect();
    let mut present = HashSet::new();

    for (entity, mut card) in &mut cards {
        match window.iter().position(|item| item.id() == card.item_id) {
            Some(rank) => {
                if card.rank != rank {
                    card.rank = rank;
                }
                present.insert(card.item_id.clone());
            }
            None => {
                debug!("despawning card {}", card.item_id);
                commands.entity(entity).despawn_recursive();
            }
        }
    }

    for (rank, item) in window.into_iter().enumerate() {
        if present.contains(item.id()) {
            continue;
        }
        debug!("spawning card {} at rank {rank}", item.id());
        commands
            .spawn((
                DeckCard {
                    item_id: item.id().to_owned(),
                    rank,
                },
                Sprite::from_color(layout.card_color, layout.card_size),
                Transform::from_xyz(0.0, 0.0, card_depth(rank, &layout)),
                Visibility::Hidden,
            ))
            .with_children(|parent| {
                (renderer.0)(parent, item);
                spawn_badges(parent, &layout);
            });
    }
}

fn spawn_badges(parent: &mut ChildBuilder, layout: &DeckLayout) {
    let half = layout.card_size / 2.0;
    for direction in SwipeDirection::iter() {
        let position = match direction {
            SwipeDirection::Right => Vec2::new(-half.x * 0.5, half.y * 0.75),
            SwipeDirection::Left => Vec2::new(half.x * 0.5, half.y * 0.75),
            SwipeDirection::Up => Vec2::new(0.0, -half.y * 0.6),
            SwipeDirection::Down => Vec2::new(0.0, half.y * 0.45),
        };
        parent.spawn((
            OverlayBadge(direction),
            Text2d::new(direction.action().as_ref().to_uppercase()),
            TextFont {
                font_size: layout.badge_font_size,
                ..default()
            },
            TextColor(layout.badge_color(direction).with_alpha(0.0)),
            Transform::from_translation(position.extend(2.0)),
        ));
    }
}

fn card_depth(rank: usize, layout: &DeckLayout) -> f32 {
    (layout.base_depth - rank as f32).max(0.0)
}

/// Applies the engine's per-card visuals to transforms, sprites and badges.
pub fn apply_card_visuals<T: SwipeItem>(
    deck: Res<SwipeDeck<T>>,
    layout: Res<DeckLayout>,
    mut cards: Query<(&DeckCard, &mut Transform, &mut Sprite, &mut Visibility, &Children)>,
    mut badges: Query<(&OverlayBadge, &mut TextColor)>,
) {
    let visuals: HashMap<&str, CardVisual> = deck
        .cards()
        .map(|(item, visual)| (item.id(), visual))
        .collect();

    for (card, mut transform, mut sprite, mut visibility, children) in &mut cards {
        let Some(visual) = visuals.get(card.item_id.as_str()) else {
            continue;
        };

        // Screen offsets grow downward, world y grows upward.
        transform.translation = Vec3::new(
            visual.offset.x,
            -visual.offset.y,
            card_depth(visual.rank, &layout),
        );
        transform.rotation = Quat::from_rotation_z(-visual.rotation.to_radians());
        transform.scale = Vec3::splat(visual.scale);
        sprite.color = layout.card_color.with_alpha(visual.opacity);
        *visibility = if visual.opacity > 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        for &child in children {
            if let Ok((badge, mut color)) = badges.get_mut(child) {
                let alpha = if visual.interactive {
                    visual.overlays.get(badge.0)
                } else {
                    0.0
                };
                color.0 = color.0.with_alpha(alpha);
            }
        }
    }
}
