pub mod deadline;
pub mod notice;
pub mod schedule;

pub use deadline::{ConfigurationError, DATE_FORMAT, Deadline, DeadlineSource};
pub use notice::{Message, Remaining, Severity, decide};
pub use schedule::{IMMINENT_DELAY, Schedule, Triggers, TriggerSpec, WARN_DAYS, generate};
