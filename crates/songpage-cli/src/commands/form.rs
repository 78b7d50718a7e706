use std::io;

use anyhow::Result;
use songpage_publish::Config;

use super::print_next_steps;
use crate::tui;

/// Collect songs through the full-screen form.
///
/// Pages that were written but not pushed get their git steps printed once
/// the terminal is back to normal.
pub fn run_form(config: &Config) -> Result<()> {
    let outcome = tui::run_tui(config)?;

    let mut stdout = io::stdout();
    for page in &outcome.created {
        println!("✅ Song page created: {}", page.path.display());
    }
    for page in &outcome.unpublished {
        print_next_steps(&mut stdout, page, config)?;
    }
    if outcome.cancelled {
        return Err(super::Cancelled.into());
    }
    Ok(())
}
