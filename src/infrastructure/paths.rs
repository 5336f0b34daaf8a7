//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which is
//! the directory Zellij was started from (usually the user's home). Paths the
//! user types in a form (`~/cv.pdf`, `docs/cv.pdf`) are mapped onto that mount
//! before the worker reads them.

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
pub const HOST_ROOT: &str = "/host";

/// Plugin data directory: `/host/.local/share/zellij/jobboard`.
///
/// Holds the trace file.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("jobboard")
}

/// Expands a leading `~` to the `/host` mount.
///
/// ```
/// use jobboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/cv.pdf"), "/host/cv.pdf");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/cv.pdf"), "/tmp/cv.pdf");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Removes the `/host` prefix so a sandbox path reads like a host path.
///
/// ```
/// use jobboard::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/docs/cv.pdf"), "/docs/cv.pdf");
/// assert_eq!(strip_host_prefix("/tmp/cv.pdf"), "/tmp/cv.pdf");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix(HOST_ROOT).unwrap_or(path).to_string()
}

/// Resolves a user-entered upload path to a readable sandbox path.
///
/// Surrounding whitespace is ignored, `~` expands to `/host` and relative
/// paths are taken relative to `/host`. Absolute paths are used as given.
/// Returns `None` for blank input.
///
/// ```
/// use jobboard::infrastructure::resolve_upload_path;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_upload_path(" ~/cv.pdf "), Some(PathBuf::from("/host/cv.pdf")));
/// assert_eq!(resolve_upload_path("docs/cv.pdf"), Some(PathBuf::from("/host/docs/cv.pdf")));
/// assert_eq!(resolve_upload_path("/host/cv.pdf"), Some(PathBuf::from("/host/cv.pdf")));
/// assert_eq!(resolve_upload_path("   "), None);
/// ```
#[must_use]
pub fn resolve_upload_path(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let expanded = expand_tilde(trimmed);
    if expanded.starts_with('/') {
        Some(PathBuf::from(expanded))
    } else {
        Some(PathBuf::from(HOST_ROOT).join(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_zellij_share() {
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/host/.local/share/zellij/jobboard")
        );
    }

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
        assert_eq!(expand_tilde("~user/cv.pdf"), "~user/cv.pdf");
    }
}
