//! Integration tests for the record → page → file pipeline.
//!
//! These tests write into temporary directories and never run git.

use songpage_core::{MarkerPolicy, RawMarker, SongDraft, SongRecord, StreamingLinks};
use songpage_publish::{generate, Config, OverwritePolicy, PublishError};
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> Config {
    Config {
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

fn test_record() -> SongRecord {
    SongRecord {
        title: "Test Song".to_string(),
        artist: "Test Artist".to_string(),
        video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        description: "d".to_string(),
        markers: vec![RawMarker::new("0:10", "intro")],
        links: StreamingLinks::default(),
    }
}

/// The documented end-to-end scenario
#[test]
fn test_generate_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(&temp_dir);

    let page = generate(&test_record(), &config).expect("generation should succeed");

    assert_eq!(page.file_name, "test-artist-test-song.html");
    assert_eq!(page.path, temp_dir.path().join("test-artist-test-song.html"));
    assert_eq!(page.marker_count, 1);
    assert_eq!(page.commit_message, "Add Test Song by Test Artist");

    let html = std::fs::read_to_string(&page.path).unwrap();
    assert_eq!(html.matches(">YouTube</a>").count(), 1);
    assert_eq!(html.matches(">Spotify</a>").count(), 0);
    assert_eq!(html.matches(">Apple Music</a>").count(), 0);
    assert_eq!(html.matches(">YouTube Music</a>").count(), 0);
    assert_eq!(html.matches("class=\"marker-item\"").count(), 1);
    assert!(html.contains("data-time=\"10\""));
}

/// Both front-ends build records through the draft; equivalent input must
/// give byte-identical files.
#[test]
fn test_front_ends_produce_identical_pages() {
    let temp_dir = TempDir::new().unwrap();

    let mut prompt_draft = SongDraft::new();
    prompt_draft.title = "Test Song\n".to_string();
    prompt_draft.artist = "Test Artist".to_string();
    prompt_draft.video_url = "https://youtu.be/dQw4w9WgXcQ".to_string();
    prompt_draft.description = "d".to_string();
    prompt_draft
        .add_marker("0:10", "intro", MarkerPolicy::Lenient)
        .unwrap();

    let mut form_draft = SongDraft::new();
    form_draft.title = "  Test Song  ".to_string();
    form_draft.artist = " Test Artist ".to_string();
    form_draft.video_url = "https://youtu.be/dQw4w9WgXcQ".to_string();
    form_draft.description = "d\n".to_string();
    form_draft
        .add_marker("0:10", "intro", MarkerPolicy::Strict)
        .unwrap();

    let first_dir = temp_dir.path().join("prompt");
    let second_dir = temp_dir.path().join("form");
    let first = generate(
        &prompt_draft.build().unwrap(),
        &Config {
            output_dir: first_dir,
            ..Config::default()
        },
    )
    .unwrap();
    let second = generate(
        &form_draft.build().unwrap(),
        &Config {
            output_dir: second_dir,
            ..Config::default()
        },
    )
    .unwrap();

    assert_eq!(first.file_name, second.file_name);
    assert_eq!(
        std::fs::read(&first.path).unwrap(),
        std::fs::read(&second.path).unwrap()
    );
}

/// Invalid records never produce a file
#[test]
fn test_invalid_video_url_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let mut record = test_record();
    record.video_url = "not a url".to_string();

    let err = generate(&record, &config_for(&temp_dir)).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_empty_slug_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut record = test_record();
    record.artist = "***".to_string();
    record.title = "!".to_string();

    let err = generate(&record, &config_for(&temp_dir)).unwrap_err();
    assert!(matches!(
        err,
        PublishError::Validation(songpage_core::Error::EmptySlug)
    ));
}

#[test]
fn test_refuse_policy_keeps_existing_page() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        overwrite: OverwritePolicy::Refuse,
        ..config_for(&temp_dir)
    };

    let first = generate(&test_record(), &config).unwrap();
    let original = std::fs::read_to_string(&first.path).unwrap();

    let mut changed = test_record();
    changed.description = "a different description".to_string();
    let err = generate(&changed, &config).unwrap_err();

    assert!(matches!(err, PublishError::AlreadyExists(_)));
    assert_eq!(std::fs::read_to_string(&first.path).unwrap(), original);
}

/// Records can be supplied as JSON
#[test]
fn test_generate_from_json_record() {
    let temp_dir = TempDir::new().unwrap();
    let record: SongRecord = serde_json::from_str(
        r#"{
            "title": "One More Time",
            "artist": "Daft Punk",
            "videoUrl": "https://www.youtube.com/watch?v=FGBhQbmPwH8&t=10",
            "description": "French house.",
            "markers": [
                {"time": "0:00", "text": "Horns"},
                {"time": "3:45", "text": "Breakdown"}
            ],
            "links": {"spotify": "https://open.spotify.com/track/0DiWol3AO6WpXZgp0goxAV"}
        }"#,
    )
    .unwrap();

    let page = generate(&record, &config_for(&temp_dir)).unwrap();
    assert_eq!(page.file_name, "daft-punk-one-more-time.html");

    let html = std::fs::read_to_string(&page.path).unwrap();
    assert!(html.contains("https://www.youtube.com/embed/FGBhQbmPwH8?enablejsapi=1"));
    assert!(html.contains("data-time=\"225\""));
    assert!(html.contains(">Spotify</a>"));
    assert!(!html.contains(">Apple Music</a>"));
}
