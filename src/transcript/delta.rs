//! Gap annotation between consecutive time positions

use crate::error::{Error, Result};
use crate::index::OrganizedNoteIndex;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Forward gap given to notes at the last time position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalGap {
    /// Leave the forward gap at zero
    #[default]
    Zero,
    /// Distance to the given end-of-piece tick
    EndOfPiece(u32),
}

/// Fills `previous_gap_ticks` and `next_gap_ticks` of every note in a
/// sorted index
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaTimeComputer {
    terminal_gap: TerminalGap,
}

impl DeltaTimeComputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terminal_gap(terminal_gap: TerminalGap) -> Self {
        Self { terminal_gap }
    }

    /// Annotate the index in a single forward pass
    pub fn run(&self, index: &mut OrganizedNoteIndex) -> Result<()> {
        if !index.is_sorted() {
            return Err(Error::IndexNotSorted);
        }
        if index.is_empty() {
            index.mark_annotated();
            return Ok(());
        }

        let mut previous_time_position = index.first_time_position()?;
        for row in 0..index.tick_count() {
            let time_position = index.time_position_at(row);
            let gap = time_position - previous_time_position;

            for note in index.notes_at_mut(row) {
                note.previous_gap_ticks = gap;
            }
            if row > 0 {
                // Only the cells present at the previous row are touched
                for note in index.notes_at_mut(row - 1) {
                    note.next_gap_ticks = gap;
                }
            }
            trace!("tick {}: gap {}", time_position, gap);
            previous_time_position = time_position;
        }

        if let TerminalGap::EndOfPiece(end) = self.terminal_gap {
            let gap = end.saturating_sub(previous_time_position);
            let last = index.tick_count() - 1;
            for note in index.notes_at_mut(last) {
                note.next_gap_ticks = gap;
            }
        }

        index.mark_annotated();
        debug!(
            "computed gaps for {} notes over {} time positions",
            index.len(),
            index.tick_count()
        );
        Ok(())
    }
}
