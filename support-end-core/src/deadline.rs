use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Accepted shape of a `SUPPORT_END` value.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{field} is not set in {}", .path.display())]
    MissingField { field: &'static str, path: PathBuf },
    #[error("no os-release file found (tried {})", join_paths(.tried))]
    NoOsRelease { tried: Vec<PathBuf> },
    #[error("read {} failed: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// `source` is absent when the value is not even shaped like a date.
    #[error("invalid date {value:?}, expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The moment support ends. Timezone-naive, midnight of the configured date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(NaiveDateTime);

impl Deadline {
    pub fn from_date(date: NaiveDate) -> Self {
        Deadline(date.and_time(NaiveTime::MIN))
    }

    pub fn at(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl FromStr for Deadline {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |source| ConfigurationError::InvalidDate {
            value: s.to_string(),
            source,
        };
        // chrono tolerates signs, padding spaces and short fields; only
        // zero-padded `YYYY-MM-DD` is accepted here.
        if !is_iso_date_shape(s) {
            return Err(invalid(None));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Deadline::from_date)
            .map_err(|e| invalid(Some(e)))
    }
}

fn is_iso_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date().format(DATE_FORMAT))
    }
}

/// Where the deadline comes from. Implementations must fail rather than
/// fall back to a made-up date.
pub trait DeadlineSource {
    fn resolve(&self) -> Result<Deadline, ConfigurationError>;
}
