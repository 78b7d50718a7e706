use serde::{Deserialize, Serialize};

use crate::timestamp;

/// A timestamp and annotation as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMarker {
    /// `minutes:seconds` text, echoed verbatim on the page.
    pub time: String,
    pub text: String,
}

impl RawMarker {
    #[must_use]
    pub fn new(time: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            text: text.into(),
        }
    }

    pub fn normalize(&self) -> NormalizedMarker {
        NormalizedMarker {
            time: self.time.clone(),
            seconds: timestamp::to_seconds(&self.time),
            text: self.text.clone(),
        }
    }
}

/// A marker with its seek offset resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMarker {
    pub time: String,
    pub seconds: u32,
    pub text: String,
}
