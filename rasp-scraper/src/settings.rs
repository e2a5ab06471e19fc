//! Environment-driven settings shared by the binaries.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The variable's value, if set and non-empty.
pub fn var(name: &str) -> Option<String> {
    non_blank(std::env::var(name).ok())
}

/// Parse a variable, warning and returning `None` when it does not parse.
pub fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(name, std::env::var(name).ok())
}

/// Read a `1`/`true`/`yes` style flag.
pub fn flag(name: &str) -> bool {
    is_truthy(std::env::var(name).ok())
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}

fn parse_value<T>(name: &str, raw: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = non_blank(raw)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(variable = name, value = %raw, error = %e, "ignoring invalid setting");
            None
        }
    }
}

fn is_truthy(raw: Option<String>) -> bool {
    non_blank(raw).is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// Base URL of the website (`RASP_BASE_URL`).
pub fn base_url() -> String {
    var("RASP_BASE_URL").unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string())
}

/// Request timeout in seconds (`RASP_TIMEOUT_SECS`).
pub fn timeout_secs() -> Option<u64> {
    parse_var("RASP_TIMEOUT_SECS")
}

/// Output file (`RASP_OUTPUT`); stdout when unset.
pub fn output_path() -> Option<PathBuf> {
    var("RASP_OUTPUT").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn unset_and_blank_are_none() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(some("  ")), None);
        assert_eq!(non_blank(some(" x ")), some(" x "));
    }

    #[test]
    fn parse_value_trims_and_falls_back_on_garbage() {
        assert_eq!(parse_value::<u64>("RASP_TIMEOUT_SECS", some(" 12 ")), Some(12));
        assert_eq!(parse_value::<u64>("RASP_TIMEOUT_SECS", some("twelve")), None);
        assert_eq!(parse_value::<u64>("RASP_TIMEOUT_SECS", None), None);
        assert_eq!(
            parse_value::<NaiveDate>("RASP_DATE", some("2018-08-22")),
            NaiveDate::from_ymd_opt(2018, 8, 22)
        );
    }

    #[test]
    fn flags() {
        assert!(is_truthy(some("TRUE")));
        assert!(is_truthy(some(" yes ")));
        assert!(is_truthy(some("1")));
        assert!(!is_truthy(some("0")));
        assert!(!is_truthy(some("")));
        assert!(!is_truthy(None));
    }
}
