use std::path::Path;

use chrono::NaiveDateTime;
use support_end_core::{ConfigurationError, Deadline, DeadlineSource, Remaining, decide, generate};
use tracing::{debug, info, warn};

pub mod cli;
pub mod config;
pub mod generator;
pub mod os_release;
pub mod platform;

pub use cli::{Cli, Mode};
pub use config::{NotifierConfig, load_config};
pub use os_release::OsReleaseSource;
pub use platform::{Acknowledgement, Platform};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template error: {0}")]
    Template(String),
    #[error("notification error: {0}")]
    Notify(String),
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_log_level().to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn default_log_level() -> &'static str {
    if std::env::var("DEBUG").as_deref() == Ok("1") {
        "debug"
    } else {
        "info"
    }
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing();

    let cfg = config::find_and_load(cli.config.clone())?;
    let source = OsReleaseSource::from_env(cfg.os_release_paths.clone());
    // One sample of the clock for the whole invocation.
    let now = chrono::Local::now().naive_local();
    let deadline = source.resolve();

    match cli.mode() {
        Mode::Status => {
            print!("{}", status_report(now, &deadline));
            Ok(())
        }
        Mode::Notify => {
            let plat = platform::detect(&cfg);
            notify(plat.as_ref(), now, deadline).await
        }
        Mode::Generate { normal_dir } => {
            let exe = std::env::current_exe()?;
            generate_units(&normal_dir, now, deadline, &exe)
        }
    }
}

/// Text printed when the binary runs without arguments.
pub fn status_report(now: NaiveDateTime, deadline: &Result<Deadline, ConfigurationError>) -> String {
    match deadline {
        Ok(d) => format!(
            "Found SUPPORT_END: {d}\n({})\n",
            Remaining::between(now, *d)
        ),
        Err(e) => format!("No SUPPORT_END found: {e}\n"),
    }
}

/// Generator mode. Without a deadline nothing is written.
pub fn generate_units(
    dir: &Path,
    now: NaiveDateTime,
    deadline: Result<Deadline, ConfigurationError>,
    binary_path: &Path,
) -> Result<(), AppError> {
    let deadline = match deadline {
        Ok(d) => d,
        Err(e) => {
            info!(error=%e, "no support end date; not generating units");
            return Ok(());
        }
    };
    let schedule = generate(now, deadline);
    info!(dir=%dir.display(), %deadline, triggers = schedule.len(), "writing support-end units");
    generator::write_units(dir, &schedule, binary_path)
}

/// Notify mode. Without a deadline nothing is shown.
pub async fn notify(
    platform: &dyn Platform,
    now: NaiveDateTime,
    deadline: Result<Deadline, ConfigurationError>,
) -> Result<(), AppError> {
    let deadline = match deadline {
        Ok(d) => d,
        Err(e) => {
            info!(error=%e, "no support end date; nothing to notify");
            return Ok(());
        }
    };
    let message = decide(now, deadline);
    debug!(%deadline, %message, "presenting support-end notice");

    match platform.present(&message).await? {
        Acknowledgement::UpgradeRequested => {
            info!("trying to start upgrade");
            if let Err(e) = platform.launch_upgrade_assistant() {
                warn!(error=%e, "could not start upgrade assistant");
            }
        }
        Acknowledgement::Dismissed => {
            debug!("notice dismissed");
        }
    }
    Ok(())
}
