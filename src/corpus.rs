use std::path::Path;

use crate::{error::Result, retrieval::ResponseEntry, text_util};

/// Load response entries from disk.
///
/// `.json` files hold an array of [`ResponseEntry`]. Any other file is read
/// as UTF-8 text with one document per non-blank line; those entries get
/// ids `line-<n>` (1-indexed line number) and are never prompts.
pub fn load(path: &Path) -> Result<Vec<ResponseEntry>> {
    let content = text_util::read_utf8_file(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let entries = if is_json {
        serde_json::from_str(&content)?
    } else {
        from_lines(&content)
    };

    tracing::debug!(
        path = %path.display(),
        entries = entries.len(),
        "loaded corpus"
    );
    Ok(entries)
}

fn from_lines(content: &str) -> Vec<ResponseEntry> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| ResponseEntry {
            id: format!("line-{}", i + 1),
            content: line.trim().to_string(),
            is_prompt: false,
        })
        .collect()
}
