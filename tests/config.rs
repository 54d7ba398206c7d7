//! Loading configuration files and logging to a file output.

use std::fs;

use annotated_log::config::{load_config, ConfigError, OutputConfig};
use annotated_log::Flags;
use tempfile::{tempdir, NamedTempFile};

fn write_config(body: &str) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), body).unwrap();
    file
}

#[test]
fn test_load_and_log_to_file() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("app.log");
    let config_file = write_config(&format!(
        r#"
flags = ["none"]
output = {{ file = {:?} }}

[[annotations]]
key = "service"
value = "billing"

[[annotations]]
key = "shard"
value = 7
"#,
        log_path.display().to_string()
    ));

    let config = load_config(config_file.path()).unwrap();
    assert_eq!(config.output, OutputConfig::File(log_path.clone()));

    let log = config.build().unwrap();
    assert_eq!(log.flags(), Flags::NONE);
    log.print(&[&"hello"]);
    log.with("req", 1).print(&[&"child"]);

    let written = fs::read_to_string(&log_path).unwrap();
    assert_eq!(
        written,
        "[service=billing shard=7] hello\n[service=billing shard=7 req=1] child\n"
    );

    // Append keeps earlier lines, truncate drops them
    config.build().unwrap().print(&[&"again"]);
    assert_eq!(fs::read_to_string(&log_path).unwrap().lines().count(), 3);

    let mut truncating = config.clone();
    truncating.append = false;
    truncating.build().unwrap().print(&[&"fresh"]);
    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "[service=billing shard=7] fresh\n"
    );
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_invalid_config_reports_all_errors() {
    let file = write_config(
        r#"
flags = ["date", "hourly"]

[[annotations]]
key = "a b"
value = 1

[[annotations]]
key = "a b"
value = 2
"#,
    );

    match load_config(file.path()).unwrap_err() {
        ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unopenable_output() {
    let dir = tempdir().unwrap();
    let file = write_config(&format!(
        "output = {{ file = {:?} }}\n",
        dir.path().join("missing").join("app.log").display().to_string()
    ));

    let config = load_config(file.path()).unwrap();
    let err = config.build().unwrap_err();
    assert!(matches!(err, ConfigError::Output { .. }));
}
