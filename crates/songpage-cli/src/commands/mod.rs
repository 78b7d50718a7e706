use std::io::Write;

use anyhow::Result;
use songpage_publish::{Config, GeneratedPage};

pub mod config;
pub mod form;
pub mod prompt;
pub mod render;

/// The user stopped an interactive flow before a page was written.
#[derive(Debug, thiserror::Error)]
#[error("cancelled")]
pub struct Cancelled;

/// Run the git steps for `page` and report the outcome.
///
/// A failed step is a warning, not an error: the page is already written.
pub fn publish_page(out: &mut impl Write, page: &GeneratedPage, config: &Config) -> Result<()> {
    match page.publish(config) {
        Ok(()) => writeln!(out, "\n🚀 Changes have been pushed!")?,
        Err(e) => {
            log::warn!("Publishing {} failed: {}", page.file_name, e);
            writeln!(out, "\n⚠️  Error pushing to git: {e}")?;
            writeln!(out, "Please run the git commands manually:")?;
            print_commands(out, page, config)?;
        }
    }
    Ok(())
}

/// Print the manual publish steps for `page`.
pub fn print_next_steps(out: &mut impl Write, page: &GeneratedPage, config: &Config) -> Result<()> {
    writeln!(out, "\nNext steps:")?;
    print_commands(out, page, config)?;
    Ok(())
}

fn print_commands(out: &mut impl Write, page: &GeneratedPage, config: &Config) -> Result<()> {
    for (i, command) in page.manual_commands(config).iter().enumerate() {
        writeln!(out, "{}. Run: {}", i + 1, command)?;
    }
    Ok(())
}
