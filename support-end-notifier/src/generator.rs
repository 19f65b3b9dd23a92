use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use support_end_core::Schedule;
use tempfile::NamedTempFile;
use tinytemplate::TinyTemplate;
use tracing::debug;

use crate::AppError;

pub const SERVICE_NAME: &str = "support-end.service";
pub const TIMER_NAME: &str = "support-end.timer";
pub const WANTS_DIR: &str = "timers.target.wants";
const SERVICE_TEMPLATE: &str = include_str!("../systemd/support-end.service");
const TIMER_TEMPLATE: &str = include_str!("../systemd/support-end.timer");

#[derive(serde::Serialize)]
struct ServiceCtx<'a> {
    binary_path: &'a str,
}

#[derive(serde::Serialize)]
struct TimerCtx {
    directives: Vec<String>,
}

/// Writes the service/timer pair into a generator output directory and
/// enables the timer. Existing files are replaced atomically.
pub fn write_units(dir: &Path, schedule: &Schedule, binary_path: &Path) -> Result<(), AppError> {
    let service = render_service(binary_path)?;
    let timer = render_timer(schedule)?;

    write_atomic(dir, SERVICE_NAME, &service)?;
    write_atomic(dir, TIMER_NAME, &timer)?;
    link_timer(dir)?;
    Ok(())
}

pub fn render_service(binary_path: &Path) -> Result<String, AppError> {
    let binary_path = exec_quote(binary_path);
    render("service", SERVICE_TEMPLATE, &ServiceCtx {
        binary_path: &binary_path,
    })
}

/// Quotes a path as a single `ExecStart=` word. Backslash and quote are
/// escaped; `%` and `$` are doubled so systemd does not expand them.
pub fn exec_quote(path: &Path) -> String {
    let raw = path.display().to_string();
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '\\' | '"' => {
                out.push('\\');
                out.push(c);
            }
            '%' | '$' => {
                out.push(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn render_timer(schedule: &Schedule) -> Result<String, AppError> {
    let directives = schedule
        .iter()
        .map(|spec| {
            debug!(%spec, "emitting timer directive");
            spec.to_string()
        })
        .collect();
    render("timer", TIMER_TEMPLATE, &TimerCtx { directives })
}

fn render<C: serde::Serialize>(name: &str, template: &str, ctx: &C) -> Result<String, AppError> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(name, template)
        .map_err(|e| AppError::Template(format!("{name}: {e}")))?;
    tt.render(name, ctx)
        .map_err(|e| AppError::Template(format!("{name}: {e}")))
}

fn write_atomic(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, AppError> {
    let path = dir.join(name);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    tmp.persist(&path).map_err(|e| AppError::Io(e.error))?;
    debug!(path=%path.display(), "wrote unit");
    Ok(path)
}

#[cfg(unix)]
fn link_timer(dir: &Path) -> Result<(), AppError> {
    let wants = dir.join(WANTS_DIR);
    fs::create_dir_all(&wants)?;
    let link = wants.join(TIMER_NAME);
    match fs::remove_file(&link) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }
    std::os::unix::fs::symlink(Path::new("..").join(TIMER_NAME), &link)?;
    Ok(())
}

#[cfg(not(unix))]
fn link_timer(_dir: &Path) -> Result<(), AppError> {
    Ok(())
}
