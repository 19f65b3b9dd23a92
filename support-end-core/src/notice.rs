use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};

use crate::Deadline;

const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Critical,
}

/// What to tell the user about the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Ended,
    /// Whole days left, truncated.
    EndsIn { days: i64 },
}

pub fn decide(now: NaiveDateTime, deadline: Deadline) -> Message {
    if now > deadline.at() {
        Message::Ended
    } else {
        Message::EndsIn {
            days: (deadline.at() - now).num_days(),
        }
    }
}

impl Message {
    pub fn summary(&self) -> String {
        match self {
            Message::Ended => "Support for this OS has ended".to_string(),
            Message::EndsIn { days: 1 } => "Support for this OS ends in 1 day".to_string(),
            Message::EndsIn { days } => format!("Support for this OS ends in {days} days"),
        }
    }

    /// Freedesktop icon name for the presenter.
    pub fn icon(&self) -> &'static str {
        "dialog-warning"
    }

    pub fn severity(&self) -> Severity {
        match self {
            Message::Ended => Severity::Critical,
            Message::EndsIn { .. } => Severity::Normal,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Time left until the deadline, or time since it passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Left(TimeDelta),
    Elapsed(TimeDelta),
}

impl Remaining {
    pub fn between(now: NaiveDateTime, deadline: Deadline) -> Self {
        if now > deadline.at() {
            Remaining::Elapsed(now - deadline.at())
        } else {
            Remaining::Left(deadline.at() - now)
        }
    }
}

fn write_span(f: &mut fmt::Formatter<'_>, span: TimeDelta) -> fmt::Result {
    let total = span.num_seconds();
    let days = total / SECS_PER_DAY;
    let rest = total % SECS_PER_DAY;
    let unit = if days == 1 { "day" } else { "days" };
    write!(
        f,
        "{days} {unit}, {:02}:{:02}:{:02}",
        rest / 3600,
        rest % 3600 / 60,
        rest % 60
    )
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::Left(span) => {
                write_span(f, *span)?;
                f.write_str(" left")
            }
            Remaining::Elapsed(span) => {
                f.write_str("ended ")?;
                write_span(f, *span)?;
                f.write_str(" ago")
            }
        }
    }
}
