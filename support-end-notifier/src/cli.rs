use std::path::PathBuf;

use clap::Parser;

const HELP_EPILOG: &str = r#"Modes:
  <normal-dir> [early-dir] [late-dir]   systemd generator: write support-end.service/.timer
  --notify                              show the desktop notification
  (no arguments)                        print the SUPPORT_END date and time left

$SUPPORT_END overrides the SUPPORT_END= field of os-release(5).

Config resolution order:
  1) --config/-c PATH
  2) $SUPPORT_END_NOTIFIER_CONFIG
  3) XDG default: ~/.config/support-end-notifier/config.yaml
"#;

#[derive(Debug, Parser)]
#[command(
    name = "support-end-notifier",
    version,
    about = "Warn the graphical session about the approaching end of OS support",
    long_about = None,
    after_long_help = HELP_EPILOG,
)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Actually display the notification
    #[arg(long, conflicts_with = "normal_dir")]
    pub notify: bool,
    /// Generator output directory for normal-priority units
    #[arg(value_name = "NORMAL_DIR")]
    pub normal_dir: Option<PathBuf>,
    /// Generator output directory for early units (unused)
    #[arg(value_name = "EARLY_DIR")]
    pub early_dir: Option<PathBuf>,
    /// Generator output directory for late units (unused)
    #[arg(value_name = "LATE_DIR")]
    pub late_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Status,
    Notify,
    Generate { normal_dir: PathBuf },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match (&self.normal_dir, self.notify) {
            (_, true) => Mode::Notify,
            (Some(dir), false) => Mode::Generate {
                normal_dir: dir.clone(),
            },
            (None, false) => Mode::Status,
        }
    }
}
