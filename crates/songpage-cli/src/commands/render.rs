use std::path::Path;

use anyhow::{Context, Result};
use songpage_core::{MarkerPolicy, SongDraft, SongRecord};
use songpage_publish::{generate, Config};

use super::{print_next_steps, publish_page};

/// Generate a page from a JSON record file.
pub fn run_render(record_path: &Path, publish: bool, config: &Config) -> Result<()> {
    let contents = std::fs::read_to_string(record_path)
        .with_context(|| format!("Failed to read {}", record_path.display()))?;
    let record: SongRecord = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", record_path.display()))?;

    let record = SongDraft::from_record(&record, MarkerPolicy::Lenient)?.build()?;
    let page = generate(&record, config)?;

    let mut stdout = std::io::stdout();
    println!("✅ Song page created: {}", page.path.display());
    if publish {
        publish_page(&mut stdout, &page, config)?;
    } else {
        print_next_steps(&mut stdout, &page, config)?;
    }

    Ok(())
}
