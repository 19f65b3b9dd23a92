#[cfg(all(unix, not(target_os = "macos")))]
pub mod linux;

use std::sync::Arc;

use async_trait::async_trait;
use support_end_core::Message;
use tracing::warn;

use crate::{AppError, config::NotifierConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// The user asked to start the upgrade.
    UpgradeRequested,
    Dismissed,
}

/// OS-level actions needed to present a notice.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Shows the message and waits until the user acts on it or it goes away.
    async fn present(&self, message: &Message) -> Result<Acknowledgement, AppError>;
    /// Starts the upgrade assistant. Implementations that exec only return on failure.
    fn launch_upgrade_assistant(&self) -> Result<(), AppError>;
}

/// Detect the current platform and return an implementation.
pub fn detect(cfg: &NotifierConfig) -> Arc<dyn Platform> {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Arc::new(linux::LinuxPlatform::new(cfg))
    }
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        let _ = cfg;
        Arc::new(LogOnly)
    }
}

/// Writes the notice to the log. Used where no desktop notifications exist.
#[derive(Debug, Default)]
pub struct LogOnly;

#[async_trait]
impl Platform for LogOnly {
    async fn present(&self, message: &Message) -> Result<Acknowledgement, AppError> {
        warn!("[SUPPORT-END] {}", message);
        Ok(Acknowledgement::Dismissed)
    }

    fn launch_upgrade_assistant(&self) -> Result<(), AppError> {
        Err(AppError::Notify(
            "no upgrade assistant without a desktop session".into(),
        ))
    }
}
