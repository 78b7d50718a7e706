//! Page color themes.

/// A `(primary, secondary)` pair of CSS hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTheme {
    pub primary: &'static str,
    pub secondary: &'static str,
}

pub const PALETTE: [ColorTheme; 5] = [
    ColorTheme::new("#8b0000", "#2d1b2e"),
    ColorTheme::new("#667eea", "#764ba2"),
    ColorTheme::new("#f093fb", "#f5576c"),
    ColorTheme::new("#4facfe", "#00f2fe"),
    ColorTheme::new("#43e97b", "#38f9d7"),
];

impl ColorTheme {
    const fn new(primary: &'static str, secondary: &'static str) -> Self {
        Self { primary, secondary }
    }

    /// Pick a theme from the artist name's length in characters.
    ///
    /// Names of equal length share a theme.
    pub fn for_artist(artist: &str) -> Self {
        PALETTE[artist.chars().count() % PALETTE.len()]
    }
}
