use serde::{Deserialize, Serialize};

use crate::model::marker::{NormalizedMarker, RawMarker};

/// Everything a front-end collects for one song page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    /// Raw user input; see [`crate::VideoId::extract`].
    pub video_url: String,
    pub description: String,
    /// Presentation order is insertion order.
    pub markers: Vec<RawMarker>,
    #[serde(default)]
    pub links: StreamingLinks,
}

impl SongRecord {
    pub fn normalized_markers(&self) -> Vec<NormalizedMarker> {
        self.markers.iter().map(RawMarker::normalize).collect()
    }

    /// Commit message used when publishing the generated page.
    pub fn commit_message(&self) -> String {
        format!("Add {} by {}", self.title, self.artist)
    }
}

/// Optional streaming service links. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLinks {
    #[serde(default)]
    pub spotify: Option<String>,
    #[serde(default)]
    pub apple_music: Option<String>,
    #[serde(default)]
    pub youtube_music: Option<String>,
}

impl StreamingLinks {
    /// Labelled links that are present, in page order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Spotify", &self.spotify),
            ("Apple Music", &self.apple_music),
            ("YouTube Music", &self.youtube_music),
        ]
        .into_iter()
        .filter_map(|(label, url)| {
            url.as_deref()
                .filter(|url| !url.is_empty())
                .map(|url| (label, url))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SongRecord {
        SongRecord {
            title: "Test Song".to_string(),
            artist: "Test Artist".to_string(),
            video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            description: "d".to_string(),
            markers: vec![RawMarker::new("0:10", "intro"), RawMarker::new("1:00", "verse")],
            links: StreamingLinks::default(),
        }
    }

    #[test]
    fn test_normalized_markers_keep_order() {
        let markers = record().normalized_markers();
        let seconds: Vec<u32> = markers.iter().map(|m| m.seconds).collect();
        assert_eq!(seconds, vec![10, 60]);
        assert_eq!(markers[1].text, "verse");
    }

    #[test]
    fn test_commit_message() {
        assert_eq!(record().commit_message(), "Add Test Song by Test Artist");
    }

    #[test]
    fn test_link_entries_skip_empty() {
        let links = StreamingLinks {
            spotify: Some(String::new()),
            apple_music: None,
            youtube_music: Some("https://music.youtube.com/watch?v=x".to_string()),
        };
        let entries: Vec<_> = links.entries().collect();
        assert_eq!(
            entries,
            vec![("YouTube Music", "https://music.youtube.com/watch?v=x")]
        );
        assert_eq!(StreamingLinks::default().entries().count(), 0);
    }

    #[test]
    fn test_link_entries_fixed_order() {
        let links = StreamingLinks {
            youtube_music: Some("c".to_string()),
            apple_music: Some("b".to_string()),
            spotify: Some("a".to_string()),
        };
        let labels: Vec<_> = links.entries().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Spotify", "Apple Music", "YouTube Music"]);
    }

    #[test]
    fn test_record_json_shape() {
        let json = r#"{
            "title": "Test Song",
            "artist": "Test Artist",
            "videoUrl": "https://youtu.be/dQw4w9WgXcQ",
            "description": "d",
            "markers": [{"time": "0:10", "text": "intro"}, {"time": "1:00", "text": "verse"}]
        }"#;
        let parsed: SongRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, record());

        let with_links: SongRecord = serde_json::from_str(
            r#"{"title":"t","artist":"a","videoUrl":"u","description":"d","markers":[],
                "links":{"appleMusic":"https://music.apple.com/x"}}"#,
        )
        .unwrap();
        assert_eq!(
            with_links.links.apple_music.as_deref(),
            Some("https://music.apple.com/x")
        );
        assert!(with_links.links.spotify.is_none());
    }
}
