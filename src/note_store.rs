use anyhow::Context;
use std::path::{Path, PathBuf};

/// File name of the note inside the user's home directory.
pub const NOTE_FILE: &str = ".overlay_notes.txt";

/// Location the note is loaded from at startup and always saved to.
pub fn default_note_path() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(NOTE_FILE)
}

/// Read the note at `path`.
///
/// A missing file is not an error and yields `Ok(None)` so callers can keep
/// whatever buffer they already have.
pub fn load_note(path: &Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read note from {}", path.display()))?;
    Ok(Some(text))
}

/// Overwrite `path` with `text`, creating missing parent directories.
pub fn save_note(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, text)
        .with_context(|| format!("failed to write note to {}", path.display()))?;
    Ok(())
}
