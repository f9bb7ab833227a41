use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::prelude::*;

pub mod config;
pub mod paths;
pub mod prelude;
pub mod store;
pub mod switch;

/// Writes `value` as pretty JSON with 4-space indentation, replacing `path` as a whole.
///
/// The content goes to a sibling `.tmp` file first and is then renamed over the target.
/// Non-ASCII characters are written literally.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> SwitcherResult<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| SwitcherError::Io(e.into()))?;

    let tmp = tmp_path(path);
    std::fs::write(&tmp, buf)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Absolute form of `path` used for equality checks.
///
/// Resolves symlinks when the file exists, otherwise falls back to a lexical absolute path.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
