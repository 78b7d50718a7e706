//! Video reference extraction.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Tried in order; the first pattern that matches wins.
const VIDEO_ID_PATTERNS: [&str; 2] = [
    r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&?/]+)",
    r"^([a-zA-Z0-9_-]{11})$",
];

static VIDEO_ID_REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();

fn video_id_regexes() -> &'static [Regex] {
    VIDEO_ID_REGEXES.get_or_init(|| {
        VIDEO_ID_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("invalid regex pattern"))
            .collect()
    })
}

/// Canonical YouTube video id, as embedded in the generated page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Extract a video id from a watch, embed or short-link URL, or accept a
    /// bare 11-character id.
    ///
    /// Returns `None` when nothing matches. Callers treat that as invalid input.
    pub fn extract(input: &str) -> Option<Self> {
        video_id_regexes()
            .iter()
            .find_map(|re| re.captures(input))
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}?enablejsapi=1", self.0)
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
