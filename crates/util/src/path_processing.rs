use std::path::PathBuf;

use dirs_next::home_dir;

/// Expands a leading `~` (either separator style) to the home directory.
///
/// Paths without a tilde, and tildes when no home directory is known, are
/// returned unchanged apart from surrounding whitespace.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let rest = if trimmed == "~" {
        Some("")
    } else {
        trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\"))
    };

    match (rest, home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(trimmed),
    }
}
