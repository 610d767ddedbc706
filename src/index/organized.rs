//! Time position → channel → pitch note table

use super::NoteTable;
use crate::error::{Error, Result};
use crate::model::{ChannelSet, NoteRecord};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Notes at one (time position, channel) cell, keyed by pitch
pub type PitchBucket = BTreeMap<u8, NoteRecord>;

/// All channel cells at one time position
#[derive(Debug, Clone)]
struct Row {
    time_position: u32,
    channels: BTreeMap<u8, PitchBucket>,
}

/// Table of notes organized by time position, channel and pitch.
///
/// Rows keep insertion order until [`sort`](Self::sort) is called. Passes
/// that depend on time order check the `sorted` flag and refuse to run on
/// an unsorted table.
#[derive(Debug, Clone)]
pub struct OrganizedNoteIndex {
    rows: Vec<Row>,
    /// Time position → row index
    positions: HashMap<u32, usize>,
    channels: ChannelSet,
    sorted: bool,
    annotated: bool,
}

impl Default for OrganizedNoteIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl OrganizedNoteIndex {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            positions: HashMap::new(),
            channels: ChannelSet::new(),
            sorted: true,
            annotated: false,
        }
    }

    /// Reorder rows by ascending time position
    pub fn sort(&mut self) {
        if !self.sorted {
            self.rows.sort_by_key(|row| row.time_position);
            self.positions = self
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| (row.time_position, i))
                .collect();
        }
        self.sorted = true;
        debug!(
            "sorted note index: {} time positions, {} channels",
            self.rows.len(),
            self.channels.len()
        );
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// True once gaps have been computed and no note was added since
    pub fn is_annotated(&self) -> bool {
        self.annotated
    }

    /// Smallest time position in the table
    pub fn first_time_position(&self) -> Result<u32> {
        let first = if self.sorted {
            self.rows.first().map(|row| row.time_position)
        } else {
            self.rows.iter().map(|row| row.time_position).min()
        };
        first.ok_or(Error::EmptyIndex)
    }

    /// Exact lookup of the note at a (time position, channel, pitch) triple
    pub fn get(&self, time_position: u32, channel: u8, pitch: u8) -> Result<&NoteRecord> {
        self.positions
            .get(&time_position)
            .and_then(|&i| self.rows[i].channels.get(&channel))
            .and_then(|bucket| bucket.get(&pitch))
            .ok_or(Error::NoteNotFound {
                time_position,
                channel,
                pitch,
            })
    }

    /// Time positions in current row order
    pub fn time_positions(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().map(|row| row.time_position)
    }

    /// (time position, channel, bucket) cells in current row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u8, &PitchBucket)> {
        self.rows.iter().flat_map(|row| {
            row.channels
                .iter()
                .map(move |(&channel, bucket)| (row.time_position, channel, bucket))
        })
    }

    /// Number of notes stored
    pub fn len(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.channels.values())
            .map(|bucket| bucket.len())
            .sum()
    }

    pub fn tick_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Time position of the row at `row`
    pub(crate) fn time_position_at(&self, row: usize) -> u32 {
        self.rows[row].time_position
    }

    /// Mutable access to every note in a row
    pub(crate) fn notes_at_mut(&mut self, row: usize) -> impl Iterator<Item = &mut NoteRecord> {
        self.rows[row]
            .channels
            .values_mut()
            .flat_map(|bucket| bucket.values_mut())
    }

    pub(crate) fn mark_annotated(&mut self) {
        self.annotated = true;
    }

    /// Consume the table into (time position, channel, notes) cells
    pub(crate) fn into_cells(self) -> impl Iterator<Item = (u32, u8, Vec<NoteRecord>)> {
        self.rows.into_iter().flat_map(|row| {
            let time_position = row.time_position;
            row.channels.into_iter().map(move |(channel, bucket)| {
                (time_position, channel, bucket.into_values().collect::<Vec<_>>())
            })
        })
    }
}

impl NoteTable for OrganizedNoteIndex {
    fn add(&mut self, note: NoteRecord) {
        let time_position = note.time_position;
        let channel = note.channel;
        let pitch = note.pitch;

        self.channels.insert(channel);
        self.annotated = false;

        let row = match self.positions.get(&time_position) {
            Some(&i) => i,
            None => {
                if let Some(last) = self.rows.last() {
                    if last.time_position > time_position {
                        self.sorted = false;
                    }
                }
                self.rows.push(Row {
                    time_position,
                    channels: BTreeMap::new(),
                });
                self.positions.insert(time_position, self.rows.len() - 1);
                self.rows.len() - 1
            }
        };

        let bucket = self.rows[row].channels.entry(channel).or_default();
        if bucket.insert(pitch, note).is_some() {
            warn!(
                "replaced note at tick {}, channel {}, pitch {}",
                time_position, channel, pitch
            );
        }
    }

    fn channels(&self) -> &ChannelSet {
        &self.channels
    }
}

impl fmt::Display for OrganizedNoteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OrganizedNoteIndex:")?;
        for (_, _, bucket) in self.iter() {
            writeln!(f, "{}:", if bucket.len() > 1 { "CHORD" } else { "NOTE" })?;
            for note in bucket.values() {
                writeln!(f, "{}", note)?;
            }
        }
        Ok(())
    }
}
