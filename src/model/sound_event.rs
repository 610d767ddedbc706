//! Notes grouped by onset and channel

use super::note::NoteRecord;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One or more notes sharing a time position and channel.
///
/// Notes are kept sorted by `next_gap_ticks`, so the first note is the
/// shortest. More than one note is a chord.
#[derive(Debug, Clone, Serialize)]
pub struct SoundEvent {
    notes: Vec<NoteRecord>,
}

impl SoundEvent {
    /// Build a sound event from a non-empty bucket of notes.
    ///
    /// Returns `None` when `notes` is empty.
    pub fn new(mut notes: Vec<NoteRecord>) -> Option<Self> {
        if notes.is_empty() {
            return None;
        }
        notes.sort_by_key(|note| note.next_gap_ticks);
        Some(Self { notes })
    }

    pub fn notes(&self) -> &[NoteRecord] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_chord(&self) -> bool {
        self.notes.len() > 1
    }

    pub fn first(&self) -> &NoteRecord {
        &self.notes[0]
    }

    /// Note with the smallest forward gap
    pub fn shortest_note(&self) -> &NoteRecord {
        self.first()
    }

    /// Smallest sounding length among the member notes
    pub fn smallest_duration(&self) -> u32 {
        self.notes
            .iter()
            .map(|note| note.duration_ticks)
            .min()
            .unwrap_or(0)
    }

    pub fn time_position(&self) -> u32 {
        self.first().time_position
    }

    pub fn channel(&self) -> u8 {
        self.first().channel
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteRecord> {
        self.notes.iter()
    }
}

impl PartialEq for SoundEvent {
    fn eq(&self, other: &Self) -> bool {
        self.notes.len() == other.notes.len()
            && self
                .notes
                .iter()
                .zip(&other.notes)
                .all(|(a, b)| a.key() == b.key())
    }
}

impl Eq for SoundEvent {}

impl Hash for SoundEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.notes.len().hash(state);
        for note in &self.notes {
            note.key().hash(state);
        }
    }
}

impl fmt::Display for SoundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", if self.is_chord() { "CHORD" } else { "NOTE" })?;
        for note in &self.notes {
            writeln!(f, "{}", note)?;
        }
        Ok(())
    }
}
