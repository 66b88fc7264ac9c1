use bevy::prelude::*;
use bevy::text::TextBounds;

use crate::entries::JournalEntry;

const INK: Color = Color::srgb(0.15, 0.13, 0.12);
const MOOD_INK: Color = Color::srgb(0.45, 0.38, 0.32);
const TEXT_WIDTH: f32 = 250.0;

/// Card content for one entry: its mood as a header, then the body.
pub fn render_entry(parent: &mut ChildBuilder, entry: &JournalEntry) {
    parent.spawn((
        Text2d::new(entry.mood.to_string()),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(MOOD_INK),
        Transform::from_xyz(0.0, 150.0, 1.0),
    ));

    parent.spawn((
        Text2d::new(entry.body.clone()),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(INK),
        TextLayout::new_with_justify(JustifyText::Center),
        TextBounds::new_horizontal(TEXT_WIDTH),
        Transform::from_xyz(0.0, 0.0, 1.0),
    ));
}
