//! Core data model and page rendering for songpage.
//!
//! This crate holds the song record types, the draft session that front-ends
//! fill in, and the pure transformation stages: timestamp normalization,
//! video id extraction, slug generation, theme selection and HTML rendering.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod draft;
pub mod error;
pub mod model;
pub mod render;
pub mod slug;
pub mod theme;
pub mod timestamp;
pub mod video;

pub use draft::{MarkerPolicy, SongDraft};
pub use error::{Error, Result};
pub use model::{NormalizedMarker, RawMarker, SongRecord, StreamingLinks};
pub use render::{Escaping, SongPage};
pub use slug::Slug;
pub use theme::ColorTheme;
pub use video::VideoId;
