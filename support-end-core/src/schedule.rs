//! Turns a deadline into the list of timer triggers that warn about it.

use std::fmt;
use std::iter::FusedIterator;
use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};

use crate::Deadline;

/// Days before the deadline at which a warning fires, earliest warning first.
pub const WARN_DAYS: [i64; 9] = [30, 20, 10, 6, 5, 4, 3, 2, 1];

/// Delay used in place of the whole table once less than a day is left.
pub const IMMINENT_DELAY: Duration = Duration::from_secs(60);

const ISO_8601: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSpec {
    /// Fire this long after the timer is activated.
    OnActive(Duration),
    /// Fire at a wall-clock time.
    OnCalendar(NaiveDateTime),
}

impl fmt::Display for TriggerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerSpec::OnActive(delay) => write!(f, "OnActiveSec={}", delay.as_secs()),
            TriggerSpec::OnCalendar(at) => write!(f, "OnCalendar={}", at.format(ISO_8601)),
        }
    }
}

/// Triggers for one deadline as seen at one point in time.
///
/// A schedule holds no cursor; every call to [`Schedule::iter`] walks the
/// same triggers from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Less than a day left (or already past): one near-immediate trigger.
    Imminent,
    /// One calendar trigger per entry of [`WARN_DAYS`]. Entries that are
    /// already in the past are kept; the timer decides what to do with them.
    Warnings { deadline: Deadline },
}

pub fn generate(now: NaiveDateTime, deadline: Deadline) -> Schedule {
    if deadline.at() - now < TimeDelta::days(1) {
        Schedule::Imminent
    } else {
        Schedule::Warnings { deadline }
    }
}

impl Schedule {
    pub fn iter(&self) -> Triggers {
        Triggers {
            schedule: *self,
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Schedule::Imminent => 1,
            Schedule::Warnings { .. } => WARN_DAYS.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn get(&self, index: usize) -> Option<TriggerSpec> {
        match self {
            Schedule::Imminent => (index == 0).then_some(TriggerSpec::OnActive(IMMINENT_DELAY)),
            Schedule::Warnings { deadline } => WARN_DAYS
                .get(index)
                .map(|days| TriggerSpec::OnCalendar(deadline.at() - TimeDelta::days(*days))),
        }
    }
}

impl IntoIterator for Schedule {
    type Item = TriggerSpec;
    type IntoIter = Triggers;

    fn into_iter(self) -> Triggers {
        self.iter()
    }
}

impl IntoIterator for &Schedule {
    type Item = TriggerSpec;
    type IntoIter = Triggers;

    fn into_iter(self) -> Triggers {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Triggers {
    schedule: Schedule,
    next: usize,
}

impl Iterator for Triggers {
    type Item = TriggerSpec;

    fn next(&mut self) -> Option<TriggerSpec> {
        let spec = self.schedule.get(self.next)?;
        self.next += 1;
        Some(spec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.schedule.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Triggers {}

impl FusedIterator for Triggers {}
