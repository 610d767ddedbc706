//! Note tables keyed by time position

pub mod organized;

use crate::model::{ChannelSet, NoteRecord};
use std::collections::BTreeMap;

pub use organized::OrganizedNoteIndex;

/// Common behaviour of tables built from a stream of notes
pub trait NoteTable {
    /// Insert a note into the table
    fn add(&mut self, note: NoteRecord);

    /// Channels observed through `add`
    fn channels(&self) -> &ChannelSet;

    fn has_channel(&self, channel: u8) -> bool {
        self.channels().contains(channel)
    }

    /// Insert every note from an iterator
    fn add_all<I>(&mut self, notes: I)
    where
        I: IntoIterator<Item = NoteRecord>,
        Self: Sized,
    {
        for note in notes {
            self.add(note);
        }
    }
}

/// Flat table holding the last note added at each time position
#[derive(Debug, Default)]
pub struct NoteIndex {
    notes: BTreeMap<u32, NoteRecord>,
    channels: ChannelSet,
}

impl NoteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, time_position: u32) -> Option<&NoteRecord> {
        self.notes.get(&time_position)
    }

    /// Notes in ascending time order
    pub fn iter(&self) -> impl Iterator<Item = &NoteRecord> {
        self.notes.values()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl NoteTable for NoteIndex {
    fn add(&mut self, note: NoteRecord) {
        self.channels.insert(note.channel);
        self.notes.insert(note.time_position, note);
    }

    fn channels(&self) -> &ChannelSet {
        &self.channels
    }
}
