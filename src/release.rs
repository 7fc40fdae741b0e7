//! Release tag resolution for screenshot namespacing.
//!
//! Screenshots are grouped under `screenshots/{tag}/` so captures from
//! different releases of the application under test do not overwrite each
//! other.

use std::path::Path;
use std::process::Command;

/// Placeholder tag used when no source-control tag can be resolved
pub const FALLBACK_TAG: &str = "v0.0.0";

/// Resolve the most recent release tag from source control.
///
/// Runs `git describe --tags --abbrev=0` in the current directory. Falls back
/// to [`FALLBACK_TAG`] if git is unavailable, the directory is not a
/// repository, no tag exists, or the output is not valid UTF-8.
pub fn resolve_release_tag() -> String {
    resolve_release_tag_in(Path::new("."))
}

/// Resolve the most recent release tag, running git in the given directory.
pub fn resolve_release_tag_in(dir: &Path) -> String {
    let output = Command::new("git")
        .args(["describe", "--tags", "--abbrev=0"])
        .current_dir(dir)
        .output();

    match output {
        Ok(out) if out.status.success() => match String::from_utf8(out.stdout) {
            Ok(tag) if !tag.trim().is_empty() => tag.trim().to_string(),
            _ => FALLBACK_TAG.to_string(),
        },
        _ => FALLBACK_TAG.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_outside_a_repository() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        assert_eq!(resolve_release_tag_in(dir.path()), FALLBACK_TAG);
    }

    #[test]
    fn test_fallback_tag_literal() {
        assert_eq!(FALLBACK_TAG, "v0.0.0");
    }
}
