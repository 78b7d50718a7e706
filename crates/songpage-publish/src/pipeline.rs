use std::path::PathBuf;

use songpage_core::{SongPage, SongRecord};

use crate::config::Config;
use crate::error::PublishResult;
use crate::git::Publisher;
use crate::output;

/// A page that has been rendered and written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub path: PathBuf,
    pub file_name: String,
    pub marker_count: usize,
    pub commit_message: String,
}

/// Render `record` and write it to the configured output directory.
///
/// Validation failures are returned before anything touches the disk.
///
/// # Errors
/// Returns an error if the record is invalid or the page cannot be written.
pub fn generate(record: &SongRecord, config: &Config) -> PublishResult<GeneratedPage> {
    log::info!("Generating page for {} by {}", record.title, record.artist);

    let page = SongPage::build(record, config.escaping())?;
    let file_name = page.file_name();
    let path = output::write_page(&config.output_dir, &file_name, &page.html, config.overwrite)?;

    log::info!("Wrote {} ({} markers)", path.display(), page.marker_count);

    Ok(GeneratedPage {
        path,
        file_name,
        marker_count: page.marker_count,
        commit_message: record.commit_message(),
    })
}

/// Build a git publisher for the configured output directory.
pub fn publisher(config: &Config) -> Publisher {
    Publisher::new(config.output_dir.clone(), config.git.clone())
}

impl GeneratedPage {
    /// Stage, commit and push this page.
    ///
    /// # Errors
    /// Returns [`crate::PublishError::Git`] naming the step that failed.
    pub fn publish(&self, config: &Config) -> PublishResult<()> {
        publisher(config).publish(&self.file_name, &self.commit_message)
    }

    /// Commands to run when publishing by hand.
    pub fn manual_commands(&self, config: &Config) -> Vec<String> {
        publisher(config).manual_commands(&self.file_name, &self.commit_message)
    }
}
