use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    Validation,
    Duplicate,
    NotFound,
    FileFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Maps an I/O failure on `path`, reporting a missing file as `NotFound`.
    pub fn from_io(err: std::io::Error, action: &str, path: &std::path::Path) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => CoreErrorCode::NotFound,
            _ => CoreErrorCode::Io,
        };
        Self::new(code, format!("failed to {action} {}: {err}", path.display()))
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}
