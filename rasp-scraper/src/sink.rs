//! JSON output for pipeline results.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

/// Errors from writing pipeline output.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing the output failed
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the output failed
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pretty-print `value` as JSON to `path`, or to stdout when `path` is `None`.
///
/// Creates parent directories if they don't exist.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: Option<&Path>) -> Result<(), SinkError> {
    let json = serde_json::to_string_pretty(value)?;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
