//! Note records and their identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Bit widths of the packed note encoding, most significant first
mod packed {
    pub const DURATION_BITS: u32 = 12;
    pub const CHANNEL_BITS: u32 = 5;
    pub const PITCH_BITS: u32 = 7;
    pub const VELOCITY_BITS: u32 = 8;

    pub const PITCH_SHIFT: u32 = VELOCITY_BITS;
    pub const CHANNEL_SHIFT: u32 = PITCH_SHIFT + PITCH_BITS;
    pub const DURATION_SHIFT: u32 = CHANNEL_SHIFT + CHANNEL_BITS;
}

/// Fields that make up the identity of a note.
///
/// Onset and gap values are not part of it: two notes sounding the same
/// way at different ticks compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteKey {
    pub duration_ticks: u32,
    pub channel: u8,
    pub pitch: u8,
    pub velocity: u8,
}

impl NoteKey {
    /// 32-bit encoding: duration (12) | channel (5) | pitch (7) | velocity (8)
    pub fn packed(&self) -> u32 {
        fn field(value: u32, bits: u32, shift: u32) -> u32 {
            (value & ((1 << bits) - 1)) << shift
        }

        field(self.duration_ticks, packed::DURATION_BITS, packed::DURATION_SHIFT)
            | field(self.channel as u32, packed::CHANNEL_BITS, packed::CHANNEL_SHIFT)
            | field(self.pitch as u32, packed::PITCH_BITS, packed::PITCH_SHIFT)
            | field(self.velocity as u32, packed::VELOCITY_BITS, 0)
    }
}

/// One note occurrence decoded from an event stream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Absolute onset tick in the piece
    pub time_position: u32,
    /// Ticks waited after the previous protocol event
    #[serde(default)]
    pub wait_ticks: u32,
    /// Intended sounding length
    pub duration_ticks: u32,
    pub channel: u8,
    pub pitch: u8,
    pub velocity: u8,
    /// Ticks since the previous time position
    #[serde(default)]
    pub previous_gap_ticks: u32,
    /// Ticks until the next time position
    #[serde(default)]
    pub next_gap_ticks: u32,
    /// Reserved for metadata resolution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}

impl NoteRecord {
    pub fn new(
        time_position: u32,
        wait_ticks: u32,
        duration_ticks: u32,
        channel: u8,
        pitch: u8,
        velocity: u8,
    ) -> Self {
        Self {
            time_position,
            wait_ticks,
            duration_ticks,
            channel,
            pitch,
            velocity,
            ..Self::default()
        }
    }

    pub fn key(&self) -> NoteKey {
        NoteKey {
            duration_ticks: self.duration_ticks,
            channel: self.channel,
            pitch: self.pitch,
            velocity: self.velocity,
        }
    }

    pub fn packed(&self) -> u32 {
        self.key().packed()
    }
}

impl PartialEq for NoteRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for NoteRecord {}

impl Hash for NoteRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for NoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Note(start_tick:{}, wait_ticks:{}, ticks:{}, previous_gap_ticks:{}, \
             next_gap_ticks:{}, channel:{}, pitch:{}, velocity:{})",
            self.time_position,
            self.wait_ticks,
            self.duration_ticks,
            self.previous_gap_ticks,
            self.next_gap_ticks,
            self.channel,
            self.pitch,
            self.velocity
        )
    }
}
