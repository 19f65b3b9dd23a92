pub mod notify;

use std::path::PathBuf;

use support_end_core::Message;
use tracing::{info, warn};

use super::{Acknowledgement, LogOnly, Platform};
use crate::AppError;
use crate::config::NotifierConfig;

/// Linux implementation of the cross-platform interface.
pub struct LinuxPlatform {
    notifier: notify::Notifier,
    upgrade_command: Vec<String>,
}

impl LinuxPlatform {
    pub fn new(cfg: &NotifierConfig) -> Self {
        ensure_session_bus_env();
        Self {
            notifier: notify::Notifier::new(&cfg.app_name),
            upgrade_command: cfg.upgrade_command.clone(),
        }
    }
}

/// Timer-started services may lack the session bus address; derive it from
/// the runtime dir when the socket is there.
pub fn ensure_session_bus_env() {
    if std::env::var_os("DBUS_SESSION_BUS_ADDRESS").is_some() {
        return;
    }
    let runtime = std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("/run/user/{}", nix::unistd::geteuid().as_raw())));
    let bus = runtime.join("bus");
    if !bus.exists() {
        return;
    }
    // SAFETY: called before any notification thread is started; values are owned UTF-8/OS strings.
    unsafe {
        if std::env::var_os("XDG_RUNTIME_DIR").is_none() {
            std::env::set_var("XDG_RUNTIME_DIR", runtime.as_os_str());
        }
        std::env::set_var("DBUS_SESSION_BUS_ADDRESS", format!("unix:path={}", bus.display()));
    }
}

#[async_trait::async_trait]
impl Platform for LinuxPlatform {
    async fn present(&self, message: &Message) -> Result<Acknowledgement, AppError> {
        let notifier = self.notifier.clone();
        let shown_message = *message;
        let shown = tokio::task::spawn_blocking(move || notifier.show_and_wait(&shown_message))
            .await
            .map_err(|e| AppError::Notify(format!("notification task failed: {e}")))?;
        match shown {
            Ok(ack) => Ok(ack),
            Err(e) => {
                warn!(error=%e, "desktop notification failed; falling back to log");
                LogOnly.present(message).await
            }
        }
    }

    fn launch_upgrade_assistant(&self) -> Result<(), AppError> {
        let Some((program, args)) = self.upgrade_command.split_first() else {
            return Err(AppError::Config("upgrade_command is empty".into()));
        };
        info!(%program, ?args, "Linux: replacing process with upgrade assistant");
        use std::os::unix::process::CommandExt;
        let err = std::process::Command::new(program).args(args).exec();
        Err(AppError::Io(err))
    }
}
