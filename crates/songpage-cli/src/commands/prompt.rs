use std::io::{self, BufRead, Write};

use anyhow::Result;
use songpage_core::{MarkerPolicy, SongDraft};
use songpage_publish::{generate, Config, GeneratedPage};

use super::{print_next_steps, publish_page, Cancelled};

/// Collect a song through line prompts on stdin/stdout.
pub fn run_prompt(config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    prompter.add_song(config)?;
    Ok(())
}

/// Line-oriented question and answer over any reader and writer.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask one question and return the answer without its line ending.
    ///
    /// End of input means the user gave up; that is reported as [`Cancelled`].
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Cancelled.into());
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Ask until the answer is not blank.
    fn ask_required(&mut self, question: &str, field: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.trim().is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "❌ {field} is required!")?;
        }
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Run the whole flow. Returns `None` when the input was rejected.
    pub fn add_song(&mut self, config: &Config) -> Result<Option<GeneratedPage>> {
        self.say("\n🎵 Add New Song to Your Collection\n")?;
        self.say("================================\n")?;

        let mut draft = SongDraft::new();
        draft.title = self.ask_required("Song Title: ", "Song title")?;
        draft.artist = self.ask_required("Artist: ", "Artist")?;
        draft.video_url = self.ask("YouTube URL: ")?;

        if let Err(e) = draft.check_video_url() {
            log::debug!("{e}");
            self.say("❌ Invalid YouTube URL!")?;
            return Ok(None);
        }

        draft.description = self.ask_required("Description (50-60 words): ", "Description")?;

        self.say("\n--- Timestamps & Annotations ---")?;
        self.collect_markers(&mut draft)?;

        self.say("\n--- Streaming Links (optional) ---")?;
        draft.spotify = self.ask("Spotify Link (or press Enter to skip): ")?;
        draft.apple_music = self.ask("Apple Music Link (or press Enter to skip): ")?;
        draft.youtube_music = self.ask("YouTube Music Link (or press Enter to skip): ")?;

        let record = match draft.build() {
            Ok(record) => record,
            Err(e) => {
                self.say(&format!("❌ {e}"))?;
                return Ok(None);
            }
        };

        let page = match generate(&record, config) {
            Ok(page) => page,
            Err(e) if e.is_validation() => {
                self.say(&format!("❌ {e}"))?;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        self.say(&format!("\n✅ Song page created: {}", page.file_name))?;

        let answer = self.ask("\nCommit and push to git now? [y/N]: ")?;
        if is_yes(&answer) {
            publish_page(&mut self.output, &page, config)?;
        } else {
            print_next_steps(&mut self.output, &page, config)?;
        }

        Ok(Some(page))
    }

    /// Read markers until an empty timestamp. At least one is required.
    fn collect_markers(&mut self, draft: &mut SongDraft) -> Result<()> {
        loop {
            let number = draft.markers().len() + 1;
            let time = self.ask(&format!(
                "Timestamp #{number} (mm:ss or leave empty to finish): "
            ))?;

            if time.trim().is_empty() {
                if draft.markers().is_empty() {
                    self.say("❌ You need at least one marker!")?;
                    continue;
                }
                return Ok(());
            }

            let text = self.ask("What to listen for: ")?;
            if let Err(e) = draft.add_marker(&time, &text, MarkerPolicy::Lenient) {
                self.say(&format!("❌ {e}"))?;
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
