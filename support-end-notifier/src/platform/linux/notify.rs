use notify_rust::{Notification, Urgency};
use support_end_core::{Message, Severity};
use tracing::debug;

use crate::AppError;
use crate::platform::Acknowledgement;

const UPGRADE_ACTION: &str = "clicked";
const UPGRADE_LABEL: &str = "Start upgrade";
const BODY: &str = "Upgrade to a newer release to keep receiving updates.";

#[derive(Debug, Clone)]
pub struct Notifier {
    app_name: String,
}

impl Notifier {
    pub fn new(app_name: &str) -> Self {
        debug!(app_name, "Linux Notifier created");
        Self {
            app_name: app_name.to_string(),
        }
    }

    /// Blocks until the notification is clicked, closed, or expires.
    pub fn show_and_wait(&self, message: &Message) -> Result<Acknowledgement, AppError> {
        debug!(%message, "show_and_wait: building notification");
        let handle = Notification::new()
            .appname(&self.app_name)
            .summary(&message.summary())
            .body(BODY)
            .icon(message.icon())
            .urgency(urgency(message.severity()))
            .action(UPGRADE_ACTION, UPGRADE_LABEL)
            .show()
            .map_err(|e| AppError::Notify(e.to_string()))?;

        let mut ack = Acknowledgement::Dismissed;
        handle.wait_for_action(|action| {
            debug!(action, "notification action received");
            if action == UPGRADE_ACTION {
                ack = Acknowledgement::UpgradeRequested;
            }
        });
        Ok(ack)
    }
}

fn urgency(severity: Severity) -> Urgency {
    match severity {
        Severity::Normal => Urgency::Normal,
        Severity::Critical => Urgency::Critical,
    }
}
