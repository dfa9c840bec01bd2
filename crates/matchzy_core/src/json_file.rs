use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core_api::{CoreError, CoreErrorCode};

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let text = fs::read_to_string(path).map_err(|e| CoreError::from_io(e, "read", path))?;
    serde_json::from_str(&text).map_err(|e| {
        CoreError::new(
            CoreErrorCode::FileFormat,
            format!("{} is not a valid file: {e}", path.display()),
        )
    })
}

/// Serializes `value` with two-space indentation and overwrites `path`,
/// creating missing parent directories.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CoreError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to render JSON for {}: {e}", path.display()),
        )
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CoreError::from_io(e, "create", parent))?;
    }

    fs::write(path, rendered).map_err(|e| CoreError::from_io(e, "write", path))
}
