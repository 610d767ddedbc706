//! Bounded windows of sound events

use crate::error::{Error, Result};
use crate::model::SoundEvent;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Append-only sequence of sound events with a fixed capacity
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    max_size: usize,
    sound_events: Vec<SoundEvent>,
}

impl Frame {
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            sound_events: Vec::new(),
        }
    }

    /// Create a frame holding `sound_events`, which must fit in `max_size`
    pub fn with_events(max_size: usize, sound_events: Vec<SoundEvent>) -> Result<Self> {
        if sound_events.len() > max_size {
            return Err(Error::FrameFull { max_size });
        }
        Ok(Self {
            max_size,
            sound_events,
        })
    }

    /// Append a sound event; a full frame is left unchanged
    pub fn add(&mut self, sound_event: SoundEvent) -> Result<()> {
        if self.is_full() {
            return Err(Error::FrameFull {
                max_size: self.max_size,
            });
        }
        self.sound_events.push(sound_event);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.sound_events.len() == self.max_size
    }

    pub fn first(&self) -> Result<&SoundEvent> {
        self.sound_events.first().ok_or(Error::EmptyFrame)
    }

    pub fn last_sound_event(&self) -> Result<&SoundEvent> {
        self.sound_events.last().ok_or(Error::EmptyFrame)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.sound_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sound_events.is_empty()
    }

    pub fn sound_events(&self) -> &[SoundEvent] {
        &self.sound_events
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundEvent> {
        self.sound_events.iter()
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.sound_events == other.sound_events
    }
}

impl Eq for Frame {}

impl Hash for Frame {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sound_events.hash(state);
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frame:")?;
        for sound_event in &self.sound_events {
            write!(f, "{}", sound_event)?;
        }
        Ok(())
    }
}

/// Iterator cutting a track into frames.
///
/// Window `i` starts at `i * stride`. Every frame is full except possibly
/// the last one.
#[derive(Debug, Clone)]
pub struct FrameWindows<'a> {
    track: &'a [SoundEvent],
    max_size: usize,
    stride: usize,
    start: usize,
}

impl<'a> FrameWindows<'a> {
    pub fn new(track: &'a [SoundEvent], max_size: usize, stride: usize) -> Result<Self> {
        if max_size == 0 || stride == 0 {
            return Err(Error::InvalidFrameSize { max_size, stride });
        }
        Ok(Self {
            track,
            max_size,
            stride,
            start: 0,
        })
    }
}

impl Iterator for FrameWindows<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.start >= self.track.len() {
            return None;
        }
        let end = self.start.saturating_add(self.max_size).min(self.track.len());
        let frame = Frame {
            max_size: self.max_size,
            sound_events: self.track[self.start..end].to_vec(),
        };

        // A trailing window already covered by the previous one adds nothing
        self.start = if end == self.track.len() {
            self.track.len()
        } else {
            self.start.saturating_add(self.stride)
        };
        Some(frame)
    }
}
