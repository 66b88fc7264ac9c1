use bevy::prelude::*;
use strum::{Display, EnumIter, IntoEnumIterator};
use swipe_deck::DeckItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Mood {
    Grateful,
    Anxious,
    Hopeful,
    Tired,
    Proud,
    Lonely,
}

/// An anonymous journal entry shown on a card.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub mood: Mood,
    pub body: String,
}

impl DeckItem for JournalEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

const BODIES: [&str; 8] = [
    "Finally called my sister after two years. We talked for three hours.",
    "I pretend to be busy at lunch so nobody sees me eat alone.",
    "Planted tomatoes on the balcony. Checking on them every morning.",
    "Passed the exam I failed twice. Nobody knows I retook it.",
    "Some days the commute is the only quiet I get.",
    "I still keep the voicemail from my grandfather.",
    "Quit the job today. Terrified and weirdly light.",
    "Learned to say no this week. Twice.",
];

/// Stand-in for the entry service. Pages through generated entries and, like
/// a real feed that overlaps between pages, repeats the tail of the previous
/// page at the start of the next one.
#[derive(Resource, Debug)]
pub struct EntryFeed {
    next_id: u32,
    batch_size: usize,
    overlap: usize,
    previous: Vec<JournalEntry>,
}

impl EntryFeed {
    pub const fn new(batch_size: usize, overlap: usize) -> Self {
        Self {
            next_id: 1,
            batch_size,
            overlap,
            previous: Vec::new(),
        }
    }

    pub fn next_batch(&mut self) -> Vec<JournalEntry> {
        let overlap_start = self.previous.len().saturating_sub(self.overlap);
        let mut batch: Vec<JournalEntry> = self
            .previous
            .get(overlap_start..)
            .unwrap_or_default()
            .to_vec();

        for _ in 0..self.batch_size {
            batch.push(generate_entry(self.next_id));
            self.next_id += 1;
        }

        self.previous.clone_from(&batch);
        batch
    }
}

fn generate_entry(serial: u32) -> JournalEntry {
    let mood = Mood::iter()
        .nth(fastrand::usize(..Mood::iter().len()))
        .unwrap_or(Mood::Hopeful);
    let body = BODIES
        .get(fastrand::usize(..BODIES.len()))
        .copied()
        .unwrap_or_default();

    JournalEntry {
        id: format!("entry-{serial}"),
        mood,
        body: body.to_owned(),
    }
}
