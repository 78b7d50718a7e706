use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("at least one timestamp marker is required")]
    NoMarkers,

    #[error("invalid timestamp '{0}': expected mm:ss (e.g. 3:45)")]
    InvalidTimestamp(String),

    #[error("marker at {0} has no annotation")]
    EmptyAnnotation(String),

    #[error("invalid YouTube URL or video id: '{0}'")]
    InvalidVideoUrl(String),

    #[error("artist and title produce an empty file name")]
    EmptySlug,

    #[error("no marker at position {index} (have {len})")]
    MarkerIndex { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
