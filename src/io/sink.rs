//! Re-encoding notes as channel events

use crate::error::Result;
use crate::model::{NoteRecord, SoundEvent};
use serde::Serialize;

/// Note messages addressed to a channel.
///
/// `tick` is the delta before the event, as in a track event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelEvent {
    NoteOn {
        tick: u32,
        channel: u8,
        pitch: u8,
        velocity: u8,
    },
    NoteOff {
        tick: u32,
        channel: u8,
        pitch: u8,
        velocity: u8,
    },
}

impl ChannelEvent {
    /// Note-on with a non-zero velocity
    pub fn is_new_note(&self) -> bool {
        matches!(self, ChannelEvent::NoteOn { velocity, .. } if *velocity > 0)
    }

    /// Note-off, or note-on with zero velocity
    pub fn has_note_ended(&self) -> bool {
        match self {
            ChannelEvent::NoteOff { .. } => true,
            ChannelEvent::NoteOn { velocity, .. } => *velocity == 0,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            ChannelEvent::NoteOn { channel, .. } | ChannelEvent::NoteOff { channel, .. } => channel,
        }
    }

    pub fn pitch(&self) -> u8 {
        match *self {
            ChannelEvent::NoteOn { pitch, .. } | ChannelEvent::NoteOff { pitch, .. } => pitch,
        }
    }
}

pub fn to_note_on_event(note: &NoteRecord, channel: u8) -> ChannelEvent {
    ChannelEvent::NoteOn {
        tick: 0,
        channel,
        pitch: note.pitch,
        velocity: note.velocity,
    }
}

/// Note-off encoded as a zero-velocity note-on
pub fn to_note_off_event(note: &NoteRecord, channel: u8) -> ChannelEvent {
    ChannelEvent::NoteOn {
        tick: 0,
        channel,
        pitch: note.pitch,
        velocity: 0,
    }
}

/// Consumer of notes to re-encode on a given channel
pub trait NoteSink {
    fn write_note(&mut self, note: &NoteRecord, channel: u8) -> Result<()>;

    fn write_sound_event(&mut self, sound_event: &SoundEvent, channel: u8) -> Result<()> {
        for note in sound_event.iter() {
            self.write_note(note, channel)?;
        }
        Ok(())
    }
}

/// Collects paired note-on/note-off events
#[derive(Debug, Default)]
pub struct EventEncoder {
    events: Vec<ChannelEvent>,
}

impl EventEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ChannelEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ChannelEvent> {
        self.events
    }
}

impl NoteSink for EventEncoder {
    fn write_note(&mut self, note: &NoteRecord, channel: u8) -> Result<()> {
        self.events.push(to_note_on_event(note, channel));
        self.events.push(to_note_off_event(note, channel));
        Ok(())
    }

    /// Chord members start together, then all release
    fn write_sound_event(&mut self, sound_event: &SoundEvent, channel: u8) -> Result<()> {
        self.events
            .extend(sound_event.iter().map(|note| to_note_on_event(note, channel)));
        self.events
            .extend(sound_event.iter().map(|note| to_note_off_event(note, channel)));
        Ok(())
    }
}
