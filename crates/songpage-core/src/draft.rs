//! Draft song record, filled in step by step by a front-end.
//!
//! A [`SongDraft`] is the single mutable piece of state in an interactive
//! session. Front-ends own it, pass it to each input step, and call
//! [`SongDraft::build`] once the user submits.

use crate::error::{Error, Result};
use crate::model::{RawMarker, SongRecord, StreamingLinks};
use crate::timestamp;
use crate::video::VideoId;

/// How marker timestamps are checked when added to a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPolicy {
    /// Accept any timestamp text; malformed values seek to 0.
    #[default]
    Lenient,
    /// Require `m:ss` with seconds below 60.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongDraft {
    pub title: String,
    pub artist: String,
    pub video_url: String,
    pub description: String,
    pub spotify: String,
    pub apple_music: String,
    pub youtube_music: String,
    markers: Vec<RawMarker>,
}

impl SongDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a draft from an existing record, checking each marker with
    /// `policy` as if it had been typed in.
    pub fn from_record(record: &SongRecord, policy: MarkerPolicy) -> Result<Self> {
        let mut draft = Self {
            title: record.title.clone(),
            artist: record.artist.clone(),
            video_url: record.video_url.clone(),
            description: record.description.clone(),
            spotify: record.links.spotify.clone().unwrap_or_default(),
            apple_music: record.links.apple_music.clone().unwrap_or_default(),
            youtube_music: record.links.youtube_music.clone().unwrap_or_default(),
            markers: Vec::with_capacity(record.markers.len()),
        };
        for marker in &record.markers {
            draft.add_marker(&marker.time, &marker.text, policy)?;
        }
        Ok(draft)
    }

    pub fn markers(&self) -> &[RawMarker] {
        &self.markers
    }

    /// Add a marker after trimming both parts.
    pub fn add_marker(&mut self, time: &str, text: &str, policy: MarkerPolicy) -> Result<()> {
        let time = time.trim();
        let text = text.trim();

        if time.is_empty() {
            return Err(Error::InvalidTimestamp(String::new()));
        }
        if policy == MarkerPolicy::Strict && !timestamp::is_strict_timestamp(time) {
            return Err(Error::InvalidTimestamp(time.to_string()));
        }
        if text.is_empty() {
            return Err(Error::EmptyAnnotation(time.to_string()));
        }

        self.markers.push(RawMarker::new(time, text));
        Ok(())
    }

    pub fn remove_marker(&mut self, index: usize) -> Result<RawMarker> {
        if index >= self.markers.len() {
            return Err(Error::MarkerIndex {
                index,
                len: self.markers.len(),
            });
        }
        Ok(self.markers.remove(index))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the video URL on its own, so a front-end can reject it as
    /// soon as it is entered.
    pub fn check_video_url(&self) -> Result<VideoId> {
        let url = self.video_url.trim();
        VideoId::extract(url).ok_or_else(|| Error::InvalidVideoUrl(url.to_string()))
    }

    /// Check required fields and produce the immutable record.
    ///
    /// All text is trimmed; empty link fields become `None`.
    pub fn build(&self) -> Result<SongRecord> {
        let required = [
            ("title", &self.title),
            ("artist", &self.artist),
            ("video URL", &self.video_url),
            ("description", &self.description),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::MissingField(name));
            }
        }
        if self.markers.is_empty() {
            return Err(Error::NoMarkers);
        }
        self.check_video_url()?;

        Ok(SongRecord {
            title: self.title.trim().to_string(),
            artist: self.artist.trim().to_string(),
            video_url: self.video_url.trim().to_string(),
            description: self.description.trim().to_string(),
            markers: self.markers.clone(),
            links: StreamingLinks {
                spotify: non_empty(&self.spotify),
                apple_music: non_empty(&self.apple_music),
                youtube_music: non_empty(&self.youtube_music),
            },
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
