//! Note record ingestion

use crate::error::Result;
use crate::model::NoteRecord;
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Supplier of already-decoded note records
pub trait NoteSource {
    fn read_notes(&mut self) -> Result<Vec<NoteRecord>>;
}

impl NoteSource for Vec<NoteRecord> {
    fn read_notes(&mut self) -> Result<Vec<NoteRecord>> {
        Ok(std::mem::take(self))
    }
}

/// Reads a JSON array of note records, gunzipping it if needed
pub struct JsonNoteSource<R> {
    reader: R,
}

impl JsonNoteSource<File> {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> JsonNoteSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> NoteSource for JsonNoteSource<R> {
    fn read_notes(&mut self) -> Result<Vec<NoteRecord>> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;

        // Check for gzip magic (0x1f 0x8b)
        if data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b {
            let mut decoder = GzDecoder::new(Cursor::new(data));
            let mut decompressed = Vec::new();
            decoder.read_to_end(&mut decompressed)?;
            data = decompressed;
        }

        let notes: Vec<NoteRecord> = serde_json::from_slice(&data)?;
        debug!("read {} note records", notes.len());
        Ok(notes)
    }
}
