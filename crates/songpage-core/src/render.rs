//! HTML rendering for song pages.
//!
//! The page is one fixed document: a themed stylesheet, header, description,
//! embedded player, marker list, streaming links and a small script that
//! seeks the player when a marker is clicked. Only these fields are
//! interpolated:
//!
//! | Field            | Escaped under [`Escaping::Html`] |
//! |------------------|----------------------------------|
//! | title, artist    | yes                              |
//! | description      | yes                              |
//! | marker time/text | yes                              |
//! | link URLs        | yes                              |
//! | video id         | yes                              |
//! | seek seconds     | no (integer)                     |
//! | theme colors     | no (fixed palette)               |
//!
//! [`Escaping::Preserve`] interpolates everything verbatim.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::model::{NormalizedMarker, SongRecord, StreamingLinks};
use crate::slug::Slug;
use crate::theme::ColorTheme;
use crate::video::VideoId;

/// How user-supplied text is embedded in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// Escape `& < > " '` in every interpolated text field.
    #[default]
    Html,
    /// Embed text as typed, so markup in a description is rendered.
    Preserve,
}

impl Escaping {
    fn apply<'s>(self, text: &'s str) -> Cow<'s, str> {
        match self {
            Self::Html => escape_html(text),
            Self::Preserve => Cow::Borrowed(text),
        }
    }
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// A rendered page and the names derived for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongPage {
    pub video_id: VideoId,
    pub slug: Slug,
    pub marker_count: usize,
    pub html: String,
}

impl SongPage {
    /// Run the record through every stage and render the document.
    ///
    /// Fails when the video URL yields no id or the slug comes out empty.
    pub fn build(record: &SongRecord, escaping: Escaping) -> Result<Self> {
        let video_id = VideoId::extract(&record.video_url)
            .ok_or_else(|| Error::InvalidVideoUrl(record.video_url.clone()))?;

        let slug = Slug::new(&record.artist, &record.title);
        if slug.is_empty() {
            return Err(Error::EmptySlug);
        }

        let markers = record.normalized_markers();
        let document = Document {
            video_id: &video_id,
            title: &record.title,
            artist: &record.artist,
            description: &record.description,
            markers: &markers,
            links: &record.links,
            theme: ColorTheme::for_artist(&record.artist),
            escaping,
        };
        let html = document.to_string();

        log::debug!(
            "Rendered {} ({} markers, {} bytes)",
            slug,
            markers.len(),
            html.len()
        );

        Ok(Self {
            video_id,
            slug,
            marker_count: markers.len(),
            html,
        })
    }

    pub fn file_name(&self) -> String {
        self.slug.file_name()
    }
}

/// The fields interpolated into the page template.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    pub video_id: &'a VideoId,
    pub title: &'a str,
    pub artist: &'a str,
    pub description: &'a str,
    pub markers: &'a [NormalizedMarker],
    pub links: &'a StreamingLinks,
    pub theme: ColorTheme,
    pub escaping: Escaping,
}

impl Document<'_> {
    fn write_markers(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for marker in self.markers {
            write!(
                f,
                r#"
                <div class="marker-item" data-time="{seconds}">
                    <span class="marker-time">{time}</span>
                    <span class="marker-text">{text}</span>
                </div>"#,
                seconds = marker.seconds,
                time = self.escaping.apply(&marker.time),
                text = self.escaping.apply(&marker.text),
            )?;
        }
        Ok(())
    }

    fn write_links(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let watch_url = self.video_id.watch_url();
        write_link(f, &self.escaping.apply(&watch_url), "YouTube")?;
        for (label, url) in self.links.entries() {
            write_link(f, &self.escaping.apply(url), label)?;
        }
        Ok(())
    }
}

fn write_link(f: &mut fmt::Formatter<'_>, href: &str, label: &str) -> fmt::Result {
    write!(
        f,
        r#"
                    <a href="{href}" target="_blank" class="stream-link">{label}</a>"#
    )
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.escaping.apply(self.title);
        let artist = self.escaping.apply(self.artist);
        let description = self.escaping.apply(self.description);
        let embed_url = self.video_id.embed_url();
        let embed_url = self.escaping.apply(&embed_url);
        let ColorTheme { primary, secondary } = self.theme;

        write!(
            f,
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {artist}</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}

        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #1a1a1a 0%, {secondary} 100%);
            min-height: 100vh;
            padding: 40px 20px;
        }}

        .container {{
            max-width: 1000px;
            margin: 0 auto;
            background: white;
            border-radius: 20px;
            box-shadow: 0 20px 60px rgba(0,0,0,0.5);
            overflow: hidden;
        }}

        .header {{
            background: linear-gradient(135deg, {primary} 0%, {secondary} 100%);
            color: white;
            padding: 40px;
            text-align: center;
        }}

        .header h1 {{
            font-size: 2.8em;
            margin-bottom: 10px;
            text-shadow: 2px 2px 4px rgba(0,0,0,0.3);
        }}

        .header p {{
            font-size: 1.3em;
            opacity: 0.9;
        }}

        .content {{
            padding: 40px;
        }}

        .description {{
            font-size: 1.1em;
            line-height: 1.8;
            color: #333;
            margin-bottom: 30px;
            padding: 20px;
            background: #f8f9fa;
            border-radius: 10px;
            border-left: 4px solid {primary};
        }}

        .video-container {{
            margin: 30px 0;
            background: #000;
            border-radius: 10px;
            overflow: hidden;
            box-shadow: 0 8px 24px rgba(0,0,0,0.3);
        }}

        .video-wrapper {{
            position: relative;
            padding-bottom: 56.25%;
            height: 0;
            overflow: hidden;
        }}

        .video-wrapper iframe {{
            position: absolute;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
        }}

        .markers-section {{
            margin: 40px 0;
            background: #f8f9fa;
            padding: 30px;
            border-radius: 10px;
        }}

        .markers-section h2 {{
            color: #333;
            margin-bottom: 20px;
            font-size: 1.4em;
        }}

        .marker-item {{
            background: white;
            padding: 18px;
            margin-bottom: 12px;
            border-radius: 8px;
            border-left: 4px solid {primary};
            cursor: pointer;
            transition: all 0.3s;
            display: flex;
            align-items: flex-start;
            gap: 15px;
        }}

        .marker-item:hover {{
            transform: translateX(5px);
            box-shadow: 0 4px 12px rgba(0,0,0,0.2);
            background: #fffbfb;
        }}

        .marker-time {{
            color: {primary};
            font-weight: bold;
            font-size: 1.1em;
            min-width: 60px;
            flex-shrink: 0;
        }}

        .marker-text {{
            color: #555;
            line-height: 1.6;
        }}

        .streaming-links {{
            margin-top: 30px;
            padding: 25px;
            background: #f8f9fa;
            border-radius: 10px;
        }}

        .streaming-links h3 {{
            color: #333;
            margin-bottom: 15px;
            font-size: 1.2em;
        }}

        .links-container {{
            display: flex;
            gap: 15px;
            flex-wrap: wrap;
        }}

        .stream-link {{
            display: inline-block;
            padding: 12px 24px;
            background: white;
            color: {primary};
            text-decoration: none;
            border-radius: 8px;
            font-weight: 600;
            transition: all 0.3s;
            border: 2px solid {primary};
        }}

        .stream-link:hover {{
            background: {primary};
            color: white;
            transform: translateY(-2px);
            box-shadow: 0 4px 12px rgba(0,0,0,0.3);
        }}

        @media (max-width: 768px) {{
            .header h1 {{
                font-size: 2em;
            }}

            .content {{
                padding: 20px;
            }}
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{title}</h1>
            <p>{artist}</p>
        </div>

        <div class="content">
            <div class="description">
                {description}
            </div>

            <div class="video-container">
                <div class="video-wrapper">
                    <iframe id="youtube-player"
                        src="{embed_url}"
                        frameborder="0"
                        allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share"
                        allowfullscreen>
                    </iframe>
                </div>
            </div>

            <div class="markers-section">
                <h2>Key Moments to Listen For:</h2>
"#
        )?;
        self.write_markers(f)?;
        f.write_str(MARKERS_TO_LINKS)?;
        self.write_links(f)?;
        f.write_str(PAGE_TAIL)
    }
}

const MARKERS_TO_LINKS: &str = r#"
            </div>

            <div class="streaming-links">
                <h3>Listen On:</h3>
                <div class="links-container">
"#;

const PAGE_TAIL: &str = r#"
                </div>
            </div>
        </div>
    </div>

    <script src="https://www.youtube.com/iframe_api"></script>
    <script>
        let player;

        function onYouTubeIframeAPIReady() {
            player = new YT.Player('youtube-player', {
                events: {
                    'onReady': onPlayerReady
                }
            });
        }

        function onPlayerReady(event) {
            document.querySelectorAll('.marker-item').forEach(item => {
                item.addEventListener('click', function() {
                    const time = parseInt(this.dataset.time);
                    player.seekTo(time, true);
                    player.playVideo();
                });
            });
        }
    </script>
</body>
</html>"#;
