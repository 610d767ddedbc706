//! Per-channel sound event sequences built from a note index

pub mod delta;
pub mod frame;

use crate::error::{Error, Result};
use crate::index::{NoteTable, OrganizedNoteIndex};
use crate::model::SoundEvent;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub use delta::{DeltaTimeComputer, TerminalGap};
pub use frame::{Frame, FrameWindows};

/// Channel → sound events in ascending time order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    tracks: BTreeMap<u8, Vec<SoundEvent>>,
}

impl Transcript {
    /// Sound events of one channel
    pub fn sound_events(&self, channel: u8) -> Result<&[SoundEvent]> {
        self.tracks
            .get(&channel)
            .map(Vec::as_slice)
            .ok_or(Error::ChannelNotFound(channel))
    }

    pub fn channels(&self) -> impl Iterator<Item = u8> + '_ {
        self.tracks.keys().copied()
    }

    pub fn tracks(&self) -> &BTreeMap<u8, Vec<SoundEvent>> {
        &self.tracks
    }

    /// Total number of sound events across all channels
    pub fn len(&self) -> usize {
        self.tracks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.values().all(Vec::is_empty)
    }

    /// Cut one channel's track into frames of `max_size`, advancing by
    /// `stride` sound events per frame
    pub fn frames(&self, channel: u8, max_size: usize, stride: usize) -> Result<FrameWindows<'_>> {
        FrameWindows::new(self.sound_events(channel)?, max_size, stride)
    }

    /// Keep only the given channel, which must have a track
    pub fn retain_channel(&mut self, channel: u8) -> Result<()> {
        if !self.tracks.contains_key(&channel) {
            return Err(Error::ChannelNotFound(channel));
        }
        self.tracks.retain(|&ch, _| ch == channel);
        Ok(())
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transcript:")?;
        for (channel, sound_events) in &self.tracks {
            writeln!(f, "Track: {}", channel)?;
            for sound_event in sound_events {
                write!(f, "{}", sound_event)?;
            }
        }
        Ok(())
    }
}

/// Turns a sorted, gap-annotated index into a [`Transcript`].
///
/// Notes are grouped per channel only; simultaneous notes on different
/// channels stay in separate tracks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptBuilder;

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, index: OrganizedNoteIndex) -> Result<Transcript> {
        if !index.is_sorted() {
            return Err(Error::IndexNotSorted);
        }
        if !index.is_annotated() {
            return Err(Error::GapsNotComputed);
        }

        let mut tracks: BTreeMap<u8, Vec<SoundEvent>> = index
            .channels()
            .iter()
            .map(|channel| (channel, Vec::new()))
            .collect();

        for (_, channel, notes) in index.into_cells() {
            if let Some(sound_event) = SoundEvent::new(notes) {
                tracks.entry(channel).or_default().push(sound_event);
            }
        }

        let transcript = Transcript { tracks };
        debug!(
            "built transcript: {} channels, {} sound events",
            transcript.tracks.len(),
            transcript.len()
        );
        Ok(transcript)
    }
}
