pub mod error;
pub mod index;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod transcript;

pub use error::Error;
pub use index::{NoteTable, OrganizedNoteIndex};
pub use model::{NoteRecord, SoundEvent};
pub use pipeline::{transcribe, Options};
pub use transcript::{DeltaTimeComputer, Frame, Transcript, TranscriptBuilder};
