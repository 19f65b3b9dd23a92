use std::path::PathBuf;

use chrono::NaiveDate;
use support_end_core::{ConfigurationError, DeadlineSource};
use support_end_notifier::OsReleaseSource;
use support_end_notifier::os_release::parse_os_release;

fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn parses_quoted_and_escaped_values() {
    let fields = parse_os_release(
        "# comment\n\
         NAME=\"Fedora Linux\"\n\
         ID=fedora\n\
         PRETTY='Fedora 40 (Workstation)'\n\
         QUOTE=\"say \\\"hi\\\" \\$HOME \\n\"\n\
         not an assignment\n\
         \n\
         ID=fedora-override\n",
    );
    assert_eq!(fields["NAME"], "Fedora Linux");
    assert_eq!(fields["PRETTY"], "Fedora 40 (Workstation)");
    assert_eq!(fields["QUOTE"], "say \"hi\" $HOME \\n");
    assert_eq!(fields["ID"], "fedora-override");
    assert_eq!(fields.len(), 4);
}

#[test]
fn unmatched_quote_is_kept_verbatim() {
    let fields = parse_os_release("A=\"open\nB=\"\n");
    assert_eq!(fields["A"], "\"open");
    assert_eq!(fields["B"], "\"");
}

#[test]
fn reads_support_end_from_first_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let real = write(&dir, "os-release", "ID=fedora\nSUPPORT_END=2025-05-13\n");
    let source = OsReleaseSource::new(vec![dir.path().join("missing"), real]);
    let d = source.resolve().unwrap();
    assert_eq!(d.date(), NaiveDate::from_ymd_opt(2025, 5, 13).unwrap());
}

#[test]
fn override_wins_over_os_release() {
    let dir = tempfile::tempdir().unwrap();
    let real = write(&dir, "os-release", "SUPPORT_END=2025-05-13\n");
    let source = OsReleaseSource::new(vec![real]).with_override(Some("2030-01-01".into()));
    assert_eq!(source.resolve().unwrap().to_string(), "2030-01-01");
}

#[test]
fn empty_override_falls_back_to_os_release() {
    let dir = tempfile::tempdir().unwrap();
    let real = write(&dir, "os-release", "SUPPORT_END=\"2025-05-13\"\n");
    let source = OsReleaseSource::new(vec![real]).with_override(Some(String::new()));
    assert_eq!(source.resolve().unwrap().to_string(), "2025-05-13");
}

#[test]
fn missing_field_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let real = write(&dir, "os-release", "ID=fedora\n");
    match OsReleaseSource::new(vec![real.clone()]).resolve() {
        Err(ConfigurationError::MissingField { field, path }) => {
            assert_eq!(field, "SUPPORT_END");
            assert_eq!(path, real);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn no_os_release_at_all() {
    let dir = tempfile::tempdir().unwrap();
    let tried = vec![dir.path().join("a"), dir.path().join("b")];
    match OsReleaseSource::new(tried.clone()).resolve() {
        Err(ConfigurationError::NoOsRelease { tried: t }) => assert_eq!(t, tried),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let real = write(&dir, "os-release", "SUPPORT_END=next year\n");
    assert!(matches!(
        OsReleaseSource::new(vec![real]).resolve(),
        Err(ConfigurationError::InvalidDate { .. })
    ));
}

#[test]
fn unreadable_candidate_falls_through_to_the_next() {
    let dir = tempfile::tempdir().unwrap();
    let unreadable = dir.path().join("etc-os-release");
    std::fs::create_dir(&unreadable).unwrap();
    let real = write(&dir, "usr-lib-os-release", "SUPPORT_END=2025-05-13\n");
    let source = OsReleaseSource::new(vec![unreadable, real]);
    assert_eq!(source.resolve().unwrap().to_string(), "2025-05-13");
}

#[test]
fn read_error_is_reported_when_nothing_else_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let unreadable = dir.path().join("etc-os-release");
    std::fs::create_dir(&unreadable).unwrap();
    let source = OsReleaseSource::new(vec![unreadable.clone(), dir.path().join("missing")]);
    match source.resolve() {
        Err(ConfigurationError::Read { path, .. }) => assert_eq!(path, unreadable),
        other => panic!("unexpected {other:?}"),
    }
}
