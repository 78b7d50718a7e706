use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use songpage_publish::Config;

mod commands;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "songpage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory to write pages to (default: current directory)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Add a song by answering prompts (the default)
    ///
    /// Asks for the title, artist, YouTube URL and a short description, then
    /// for timestamp markers until an empty timestamp is entered, and finally
    /// for optional Spotify, Apple Music and YouTube Music links.
    ///
    /// The page is written as `<artist>-<title>.html` to the output directory.
    /// Afterwards you can commit and push it with git, or get the commands to
    /// run yourself.
    Prompt,
    /// Add a song through a full-screen form
    ///
    /// Fields are moved between with Tab / Shift-Tab. Markers are added with
    /// Enter on the marker row (times must be mm:ss) and removed with Delete in
    /// the marker list. Ctrl-S creates the page, Ctrl-L clears the form and
    /// Esc quits.
    Form,
    /// Generate a page from a JSON song record
    Render {
        /// Path to the record (`title`, `artist`, `videoUrl`, `description`,
        /// `markers`, optional `links`)
        record: PathBuf,

        /// Commit and push the page after writing it
        #[arg(long)]
        publish: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the current effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<commands::Cancelled>().is_some() => {
            eprintln!("\n\n❌ Cancelled");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n❌ Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Prompt) {
        Commands::Prompt => commands::prompt::run_prompt(&setup(cli.output_dir)?),
        Commands::Form => commands::form::run_form(&setup(cli.output_dir)?),
        Commands::Render { record, publish } => {
            commands::render::run_render(&record, publish, &setup(cli.output_dir)?)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(),
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config(),
        },
    }
}

/// Load configuration and start logging for the page generating commands.
fn setup(output_dir: Option<PathBuf>) -> Result<Config> {
    let mut config = match output_dir {
        Some(dir) => Config::load_with_output_dir(dir)?,
        None => Config::load()?,
    };

    let logging = std::mem::take(&mut config.logging);
    twyg::setup(logging).map_err(|e| anyhow::anyhow!("Could not set up logging: {e:?}"))?;

    Ok(config)
}
