//! SQLite path preparation utilities.

use std::io;
use std::path::{Path, PathBuf};

use super::MEMORY_DSN;
use crate::{DbError, Result};

/// True for DSNs that open a private in-memory database.
pub fn is_memory_dsn(dsn: &str) -> bool {
    let dsn = dsn.trim();
    dsn.eq_ignore_ascii_case("sqlite::memory:")
        || dsn.eq_ignore_ascii_case("sqlite://:memory:")
        || dsn.eq_ignore_ascii_case("sqlite://memory:")
        || dsn.contains("mode=memory")
}

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as `sqlite::memory:`.
/// - Relative file paths are joined onto `base_dir`.
/// - Normalizes backslashes into forward slashes (important on Windows).
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if is_memory_dsn(dsn) {
        if dsn.contains("mode=memory") {
            return Ok(dsn.to_string());
        }
        return Ok(MEMORY_DSN.to_string());
    }

    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| DbError::UnknownDsn(format!("DSN must start with sqlite:// (got: {dsn})")))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(DbError::UnknownDsn("Empty SQLite path in DSN".to_string()));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if create_dirs {
        if let Some(dir) = p.parent() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Ensure the parent directory of a file-backed DSN exists.
pub(crate) fn prepare_sqlite_path(dsn: &str, create_dirs: bool) -> io::Result<()> {
    if is_memory_dsn(dsn) || !create_dirs {
        return Ok(());
    }

    if let Some(parent) = file_path_of(dsn).as_deref().and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn file_path_of(dsn: &str) -> Option<PathBuf> {
    let rest = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))?;
    let path = rest.split_once('?').map_or(rest, |(p, _)| p);
    (!path.is_empty()).then(|| PathBuf::from(path))
}
