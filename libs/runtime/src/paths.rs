//! Home directory resolution.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the server home directory.
///
/// - `None` → `<user home>/<default_subdir>`
/// - `~` or `~/...` → expanded against the user home
/// - relative paths → joined onto the current working directory
///
/// With `create` set, the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match configured {
        None => user_home()?.join(default_subdir),
        Some(raw) => expand(raw.trim())?,
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .context("current directory is not accessible")?
            .join(path)
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home dir {}", path.display()))?;
    } else if path.exists() && !path.is_dir() {
        bail!("home dir {} exists and is not a directory", path.display());
    }

    Ok(path)
}

fn expand(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(Path::new(raw).to_path_buf())
}

fn user_home() -> Result<PathBuf> {
    // Prefer HOME so tests and containers can redirect it.
    #[cfg(not(target_os = "windows"))]
    if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().context("cannot determine the user home directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absolute_path_is_kept_and_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("srv").join("home");
        let out = resolve_home_dir(Some(target.to_string_lossy().into()), ".x", true).unwrap();
        assert_eq!(out, target);
        assert!(target.is_dir());
    }

    #[test]
    fn tilde_is_expanded() {
        let out = resolve_home_dir(Some("~/.users-test".into()), ".x", false).unwrap();
        assert!(out.is_absolute());
        assert!(out.ends_with(".users-test"));
    }

    #[test]
    fn file_in_place_of_dir_is_rejected() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("plain");
        std::fs::write(&file, b"x").unwrap();
        assert!(resolve_home_dir(Some(file.to_string_lossy().into()), ".x", false).is_err());
    }
}
