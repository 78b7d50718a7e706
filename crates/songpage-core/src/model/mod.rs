pub mod marker;
pub mod record;

pub use marker::{NormalizedMarker, RawMarker};
pub use record::{SongRecord, StreamingLinks};
