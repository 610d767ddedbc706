pub mod channels;
pub mod note;
pub mod sound_event;

pub use channels::ChannelSet;
pub use note::{NoteKey, NoteRecord};
pub use sound_event::SoundEvent;
