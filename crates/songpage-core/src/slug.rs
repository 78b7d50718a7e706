//! File name slugs derived from artist and title.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

static NON_ALNUM_RUN: OnceLock<Regex> = OnceLock::new();

fn non_alnum_run() -> &'static Regex {
    NON_ALNUM_RUN.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("invalid regex pattern"))
}

/// Lowercase `[a-z0-9]` tokens joined by single hyphens.
///
/// May be empty when neither artist nor title contains an ASCII letter or
/// digit; callers decide whether that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(artist: &str, title: &str) -> Self {
        let joined = format!("{artist}-{title}").to_lowercase();
        let hyphenated = non_alnum_run().replace_all(&joined, "-");
        Self(hyphenated.trim_matches('-').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Output file name, `<slug>.html`.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
