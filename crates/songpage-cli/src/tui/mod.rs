use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use songpage_core::{Error as DraftError, MarkerPolicy, SongDraft, SongRecord};
use songpage_publish::config::GitConfig;
use songpage_publish::{generate, Config, GeneratedPage, Publisher, PublishResult};

pub mod form_view;

/// Focusable parts of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Artist,
    VideoUrl,
    Description,
    MarkerTime,
    MarkerText,
    Markers,
    Spotify,
    AppleMusic,
    YoutubeMusic,
}

impl Field {
    const ORDER: [Self; 10] = [
        Self::Title,
        Self::Artist,
        Self::VideoUrl,
        Self::Description,
        Self::MarkerTime,
        Self::MarkerText,
        Self::Markers,
        Self::Spotify,
        Self::AppleMusic,
        Self::YoutubeMusic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Song Title",
            Self::Artist => "Artist",
            Self::VideoUrl => "YouTube URL",
            Self::Description => "Description",
            Self::MarkerTime => "Time (mm:ss)",
            Self::MarkerText => "Annotation",
            Self::Markers => "Markers",
            Self::Spotify => "Spotify",
            Self::AppleMusic => "Apple Music",
            Self::YoutubeMusic => "YouTube Music",
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// What the form is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Editing,
    /// "Clear all fields?" yes/no.
    ConfirmClear,
    /// The page was written; commit and push it?
    ConfirmPublish(GeneratedPage),
    /// "Add another song?" yes/no.
    ConfirmAnother,
}

/// Work the event loop has to do outside key handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Publish(GeneratedPage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

/// Application state for the song form.
#[derive(Debug)]
pub struct App {
    pub draft: SongDraft,
    pub marker_time: String,
    pub marker_text: String,
    pub focus: Field,
    pub selected_marker: usize,
    pub mode: Mode,
    pub status: Option<Status>,
    pub created: Vec<GeneratedPage>,
    /// Pages written but not pushed, still waiting for manual git steps.
    pub unpublished: Vec<GeneratedPage>,
    pub git: GitConfig,
    pub should_quit: bool,
    pub cancelled: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            draft: SongDraft::new(),
            marker_time: String::new(),
            marker_text: String::new(),
            focus: Field::Title,
            selected_marker: 0,
            mode: Mode::Editing,
            status: None,
            created: Vec::new(),
            unpublished: Vec::new(),
            git: GitConfig::default(),
            should_quit: false,
            cancelled: false,
        }
    }

    pub fn with_git(git: GitConfig) -> Self {
        Self {
            git,
            ..Self::new()
        }
    }

    /// Text buffer behind a field, if it is editable.
    pub fn field_value(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Title => &self.draft.title,
            Field::Artist => &self.draft.artist,
            Field::VideoUrl => &self.draft.video_url,
            Field::Description => &self.draft.description,
            Field::MarkerTime => &self.marker_time,
            Field::MarkerText => &self.marker_text,
            Field::Spotify => &self.draft.spotify,
            Field::AppleMusic => &self.draft.apple_music,
            Field::YoutubeMusic => &self.draft.youtube_music,
            Field::Markers => return None,
        };
        Some(value.as_str())
    }

    fn field_value_mut(&mut self, field: Field) -> Option<&mut String> {
        let value = match field {
            Field::Title => &mut self.draft.title,
            Field::Artist => &mut self.draft.artist,
            Field::VideoUrl => &mut self.draft.video_url,
            Field::Description => &mut self.draft.description,
            Field::MarkerTime => &mut self.marker_time,
            Field::MarkerText => &mut self.marker_text,
            Field::Spotify => &mut self.draft.spotify,
            Field::AppleMusic => &mut self.draft.apple_music,
            Field::YoutubeMusic => &mut self.draft.youtube_music,
            Field::Markers => return None,
        };
        Some(value)
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some(Status {
            kind,
            message: message.into(),
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.cancel();
            return Action::None;
        }

        match self.mode.clone() {
            Mode::Editing => self.handle_editing_key(key),
            Mode::ConfirmClear => {
                match key.code {
                    KeyCode::Char('y' | 'Y') => {
                        self.reset();
                        self.set_status(StatusKind::Info, "Form cleared");
                    }
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => self.mode = Mode::Editing,
                    _ => {}
                }
                Action::None
            }
            Mode::ConfirmPublish(page) => match key.code {
                KeyCode::Char('y' | 'Y') => Action::Publish(page),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    let steps = self.manual_steps(&page);
                    self.set_status(StatusKind::Info, format!("Not published. Run: {steps}"));
                    self.unpublished.push(page);
                    self.mode = Mode::ConfirmAnother;
                    Action::None
                }
                _ => Action::None,
            },
            Mode::ConfirmAnother => {
                match key.code {
                    KeyCode::Char('y' | 'Y') => {
                        self.reset();
                    }
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => self.should_quit = true,
                    _ => {}
                }
                Action::None
            }
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => return Action::Submit,
                KeyCode::Char('l') => self.mode = Mode::ConfirmClear,
                _ => {}
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Esc => self.cancel(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Up if self.focus == Field::Markers => {
                self.selected_marker = self.selected_marker.saturating_sub(1);
            }
            KeyCode::Down if self.focus == Field::Markers => {
                if self.selected_marker + 1 < self.draft.markers().len() {
                    self.selected_marker += 1;
                }
            }
            KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::Delete | KeyCode::Backspace if self.focus == Field::Markers => {
                self.remove_selected_marker();
            }
            KeyCode::Enter => match self.focus {
                Field::MarkerTime | Field::MarkerText => self.add_marker(),
                _ => self.focus = self.focus.next(),
            },
            KeyCode::Backspace => {
                if let Some(value) = self.field_value_mut(self.focus) {
                    value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(value) = self.field_value_mut(self.focus) {
                    value.push(c);
                }
            }
            _ => {}
        }
        Action::None
    }

    fn add_marker(&mut self) {
        if self.marker_time.trim().is_empty() || self.marker_text.trim().is_empty() {
            self.set_status(StatusKind::Warning, "Please enter both time and annotation!");
            return;
        }

        match self
            .draft
            .add_marker(&self.marker_time, &self.marker_text, MarkerPolicy::Strict)
        {
            Ok(()) => {
                let time = self.marker_time.trim().to_string();
                self.marker_time.clear();
                self.marker_text.clear();
                self.focus = Field::MarkerTime;
                self.selected_marker = self.draft.markers().len() - 1;
                self.set_status(StatusKind::Info, format!("Added marker at {time}"));
            }
            Err(DraftError::InvalidTimestamp(_)) => {
                self.set_status(
                    StatusKind::Warning,
                    "Time must be in mm:ss format (e.g., 3:45)",
                );
            }
            Err(e) => self.set_status(StatusKind::Warning, e.to_string()),
        }
    }

    fn remove_selected_marker(&mut self) {
        if let Ok(marker) = self.draft.remove_marker(self.selected_marker) {
            let remaining = self.draft.markers().len();
            self.selected_marker = self.selected_marker.min(remaining.saturating_sub(1));
            self.set_status(StatusKind::Info, format!("Removed marker at {}", marker.time));
        }
    }

    /// Validate the draft and hand the record to `generate`.
    pub fn submit_with(
        &mut self,
        generate: impl FnOnce(&SongRecord) -> PublishResult<GeneratedPage>,
    ) {
        let record = match self.draft.build() {
            Ok(record) => record,
            Err(DraftError::MissingField(_)) => {
                self.set_status(StatusKind::Error, "Please fill in all required fields!");
                return;
            }
            Err(DraftError::NoMarkers) => {
                self.set_status(
                    StatusKind::Error,
                    "Please add at least one timestamp marker!",
                );
                return;
            }
            Err(e) => {
                self.set_status(StatusKind::Error, e.to_string());
                return;
            }
        };

        match generate(&record) {
            Ok(page) => {
                self.set_status(
                    StatusKind::Info,
                    format!("Song page created: {}", page.file_name),
                );
                self.created.push(page.clone());
                self.mode = Mode::ConfirmPublish(page);
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    /// Record the outcome of the git steps for `page` and move on to "add another?".
    pub fn finish_publish(&mut self, page: GeneratedPage, result: PublishResult<()>) {
        match result {
            Ok(()) => self.set_status(StatusKind::Info, "Changes have been pushed!"),
            Err(e) => {
                let steps = self.manual_steps(&page);
                self.set_status(StatusKind::Warning, format!("{e}. Run manually: {steps}"));
                self.unpublished.push(page);
            }
        }
        self.mode = Mode::ConfirmAnother;
    }

    /// The git commands for `page`, joined for the status line.
    fn manual_steps(&self, page: &GeneratedPage) -> String {
        let repo_dir = page.path.parent().unwrap_or(page.path.as_path());
        Publisher::new(repo_dir, self.git.clone())
            .manual_commands(&page.file_name, &page.commit_message)
            .join("; ")
    }

    fn reset(&mut self) {
        self.draft.clear();
        self.marker_time.clear();
        self.marker_text.clear();
        self.focus = Field::Title;
        self.selected_marker = 0;
        self.mode = Mode::Editing;
        self.status = None;
    }

    fn cancel(&mut self) {
        self.cancelled = true;
        self.should_quit = true;
    }
}

/// What happened during a form session.
#[derive(Debug)]
pub struct Outcome {
    pub created: Vec<GeneratedPage>,
    pub unpublished: Vec<GeneratedPage>,
    pub cancelled: bool,
}

/// Run the song form.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(config: &Config) -> Result<Outcome> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_git(config.git.clone());
    let result = run_event_loop(&mut terminal, &mut app, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| Outcome {
        created: app.created,
        unpublished: app.unpublished,
        cancelled: app.cancelled,
    })
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &Config,
) -> Result<()> {
    loop {
        terminal.draw(|frame| form_view::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key) {
                Action::None => {}
                Action::Submit => {
                    app.submit_with(|record| generate(record, config));
                    // Log output may have landed on the screen.
                    terminal.clear()?;
                }
                Action::Publish(page) => {
                    let result = page.publish(config);
                    app.finish_publish(page, result);
                    terminal.clear()?;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use songpage_publish::PublishError;
    use std::path::PathBuf;

    fn press(app: &mut App, code: KeyCode) -> Action {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> Action {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn fake_page(file_name: &str) -> GeneratedPage {
        GeneratedPage {
            path: PathBuf::from("/site").join(file_name),
            file_name: file_name.to_string(),
            marker_count: 1,
            commit_message: "Add T by A".to_string(),
        }
    }

    fn filled_app() -> App {
        let mut app = App::new();
        type_text(&mut app, "Test Song");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Test Artist");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "https://youtu.be/dQw4w9WgXcQ");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "d");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "0:10");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "intro");
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let app = filled_app();
        assert_eq!(app.draft.title, "Test Song");
        assert_eq!(app.draft.artist, "Test Artist");
        assert_eq!(app.draft.description, "d");
        assert_eq!(app.draft.markers().len(), 1);
        assert_eq!(app.focus, Field::MarkerTime);
        assert!(app.marker_time.is_empty() && app.marker_text.is_empty());
    }

    #[test]
    fn test_backspace_edits_field() {
        let mut app = App::new();
        type_text(&mut app, "Tesst");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "t");
        assert_eq!(app.draft.title, "Test");
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = App::new();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Field::YoutubeMusic);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::Title);
    }

    #[test]
    fn test_strict_marker_validation() {
        let mut app = App::new();
        app.focus = Field::MarkerTime;
        type_text(&mut app, "3:75");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "solo");
        press(&mut app, KeyCode::Enter);

        assert!(app.draft.markers().is_empty());
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert_eq!(status.message, "Time must be in mm:ss format (e.g., 3:45)");
        // Input is kept so it can be corrected.
        assert_eq!(app.marker_time, "3:75");
    }

    #[test]
    fn test_marker_needs_both_parts() {
        let mut app = App::new();
        app.focus = Field::MarkerTime;
        type_text(&mut app, "1:00");
        press(&mut app, KeyCode::Enter);
        assert!(app.draft.markers().is_empty());
        assert_eq!(
            app.status.unwrap().message,
            "Please enter both time and annotation!"
        );
    }

    #[test]
    fn test_remove_selected_marker() {
        let mut app = App::new();
        for (time, text) in [("0:10", "a"), ("0:20", "b"), ("0:30", "c")] {
            app.draft.add_marker(time, text, MarkerPolicy::Strict).unwrap();
        }
        app.focus = Field::Markers;
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Delete);

        let texts: Vec<_> = app.draft.markers().iter().map(|m| m.text.clone()).collect();
        assert_eq!(texts, vec!["a", "c"]);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.draft.markers().len(), 1);
        assert_eq!(app.selected_marker, 0);
    }

    #[test]
    fn test_submit_missing_fields() {
        let mut app = App::new();
        assert_eq!(ctrl(&mut app, 's'), Action::Submit);
        app.submit_with(|_| panic!("should not generate"));
        assert_eq!(
            app.status.unwrap().message,
            "Please fill in all required fields!"
        );
    }

    #[test]
    fn test_submit_without_markers() {
        let mut app = filled_app();
        app.draft.remove_marker(0).unwrap();
        app.submit_with(|_| panic!("should not generate"));
        assert_eq!(
            app.status.unwrap().message,
            "Please add at least one timestamp marker!"
        );
    }

    #[test]
    fn test_submit_then_publish_then_quit() {
        let mut app = filled_app();
        app.submit_with(|record| {
            assert_eq!(record.title, "Test Song");
            assert_eq!(record.markers.len(), 1);
            Ok(fake_page("test-artist-test-song.html"))
        });

        assert_eq!(app.created.len(), 1);
        assert!(matches!(app.mode, Mode::ConfirmPublish(_)));

        let action = press(&mut app, KeyCode::Char('y'));
        assert_eq!(action, Action::Publish(fake_page("test-artist-test-song.html")));

        app.finish_publish(
            fake_page("test-artist-test-song.html"),
            Err(PublishError::Git {
                step: songpage_publish::GitStep::Push,
                message: "no upstream".to_string(),
            }),
        );
        assert_eq!(app.mode, Mode::ConfirmAnother);
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(status.message.starts_with("git push failed: no upstream."));
        assert!(status.message.contains("git add test-artist-test-song.html"));
        assert!(status.message.contains("git commit -m 'Add T by A'"));
        assert_eq!(app.unpublished, vec![fake_page("test-artist-test-song.html")]);

        press(&mut app, KeyCode::Char('n'));
        assert!(app.should_quit);
        assert!(!app.cancelled);
    }

    #[test]
    fn test_declining_publish_shows_git_commands() {
        let git = GitConfig {
            remote: Some("origin".to_string()),
            branch: Some("main".to_string()),
        };
        let mut app = App::with_git(git);
        app.draft = filled_app().draft;
        app.submit_with(|_| Ok(fake_page("a-t.html")));

        assert_eq!(press(&mut app, KeyCode::Char('n')), Action::None);
        assert_eq!(app.mode, Mode::ConfirmAnother);
        assert_eq!(
            app.status.clone().unwrap().message,
            "Not published. Run: git add a-t.html; git commit -m 'Add T by A'; git push origin main"
        );
        assert_eq!(app.unpublished, vec![fake_page("a-t.html")]);
    }

    #[test]
    fn test_successful_publish_is_not_pending() {
        let mut app = filled_app();
        app.submit_with(|_| Ok(fake_page("a-t.html")));
        app.finish_publish(fake_page("a-t.html"), Ok(()));
        assert_eq!(app.status.unwrap().message, "Changes have been pushed!");
        assert!(app.unpublished.is_empty());
    }

    #[test]
    fn test_add_another_resets_form() {
        let mut app = filled_app();
        app.submit_with(|_| Ok(fake_page("x.html")));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::ConfirmAnother);
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(app.mode, Mode::Editing);
        assert_eq!(app.draft, SongDraft::new());
        assert_eq!(app.created.len(), 1);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut app = filled_app();
        ctrl(&mut app, 'l');
        assert_eq!(app.mode, Mode::ConfirmClear);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.draft.title, "Test Song");

        ctrl(&mut app, 'l');
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.draft, SongDraft::new());
        assert_eq!(app.mode, Mode::Editing);
    }

    #[test]
    fn test_escape_cancels() {
        let mut app = filled_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
        assert!(app.cancelled);

        let mut app = App::new();
        ctrl(&mut app, 'c');
        assert!(app.cancelled);
    }
}
