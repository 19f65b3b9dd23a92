//! `SUPPORT_END` lookup: environment override first, then os-release(5).

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use support_end_core::{ConfigurationError, Deadline, DeadlineSource};
use tracing::debug;

pub const SUPPORT_END_FIELD: &str = "SUPPORT_END";
pub const ENV_SUPPORT_END: &str = "SUPPORT_END";
pub const DEFAULT_OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];

#[derive(Debug, Clone)]
pub struct OsReleaseSource {
    override_value: Option<String>,
    paths: Vec<PathBuf>,
}

impl OsReleaseSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            override_value: None,
            paths,
        }
    }

    /// Picks up `$SUPPORT_END`; an empty value counts as unset.
    pub fn from_env(paths: Vec<PathBuf>) -> Self {
        Self::new(paths).with_override(std::env::var(ENV_SUPPORT_END).ok())
    }

    pub fn with_override(mut self, value: Option<String>) -> Self {
        self.override_value = value.filter(|v| !v.is_empty());
        self
    }
}

impl DeadlineSource for OsReleaseSource {
    fn resolve(&self) -> Result<Deadline, ConfigurationError> {
        if let Some(v) = &self.override_value {
            debug!(value=%v, "using SUPPORT_END from environment");
            return v.parse();
        }
        let (path, fields) = read_os_release(&self.paths)?;
        let value = fields
            .get(SUPPORT_END_FIELD)
            .ok_or(ConfigurationError::MissingField {
                field: SUPPORT_END_FIELD,
                path,
            })?;
        value.parse()
    }
}

/// Reads the first os-release file that can be read. Any read error moves on
/// to the next candidate; if none succeeds, the last real error (anything but
/// "not found") is reported.
pub fn read_os_release(
    paths: &[PathBuf],
) -> Result<(PathBuf, HashMap<String, String>), ConfigurationError> {
    let mut last_error = None;
    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!(path=%path.display(), "read os-release");
                return Ok((path.clone(), parse_os_release(&text)));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => {
                debug!(path=%path.display(), error=%e, "cannot read os-release; trying next");
                last_error = Some((path.clone(), e));
            }
        }
    }
    match last_error {
        Some((path, source)) => Err(ConfigurationError::Read { path, source }),
        None => Err(ConfigurationError::NoOsRelease {
            tried: paths.to_vec(),
        }),
    }
}

/// Parses `KEY=value` assignments. Lines that are not assignments
/// (comments, blanks, garbage) are skipped; later keys win.
pub fn parse_os_release(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(parse_line)
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn parse_line(line: &str) -> Option<(&str, String)> {
    let (name, raw) = line.split_once('=')?;
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((name, unescape(strip_quotes(raw))))
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && matches!(next, '\\' | '$' | '"' | '\'' | '`')
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}
