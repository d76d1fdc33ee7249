use super::{apply_config, load_config_file, types::ConfigFile};
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{BenchArgs, BenchMode, OutputFormat};
use crate::error::{AppError, ConfigError};

fn parse_with_matches(argv: &[&str]) -> Result<(BenchArgs, ArgMatches), String> {
    let matches = BenchArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = BenchArgs::from_arg_matches(&matches).map_err(|err| format!("{}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("hitbench.toml");
    let content = r#"
mode = "write"
url = "http://db:8080/databases/Bench"
requests = 1000
clients = 16
status = 204
data_file = "disk.json"
connect_timeout = 5
read_timeout = "750ms"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    let checks = [
        (config.mode == Some(BenchMode::Write), "Unexpected mode"),
        (
            config.url.as_deref() == Some("http://db:8080/databases/Bench"),
            "Unexpected url",
        ),
        (config.requests == Some(1000), "Unexpected requests"),
        (config.clients == Some(16), "Unexpected clients"),
        (config.status == Some(204), "Unexpected status"),
        (
            config.data_file.as_deref() == Some("disk.json"),
            "Unexpected data_file",
        ),
        (config.write_timeout.is_none(), "Expected no write_timeout"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(message.to_owned());
        }
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("hitbench.json");
    let content = r#"{"mode":"read","id_range":50,"output_format":"json","print_urls":true}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.mode != Some(BenchMode::Read)
        || config.id_range != Some(50)
        || config.output_format != Some(OutputFormat::Json)
        || config.print_urls != Some(true)
    {
        return Err(format!("Unexpected config: {:?}", config));
    }
    Ok(())
}

#[test]
fn load_config_rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let yaml = dir.path().join("hitbench.yaml");
    std::fs::write(&yaml, "mode: read").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&yaml) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => {}
        other => return Err(format!("Expected UnsupportedExtension, got {:?}", other)),
    }

    let bare = dir.path().join("hitbench");
    std::fs::write(&bare, "").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&bare) {
        Err(AppError::Config(ConfigError::MissingExtension)) => Ok(()),
        other => Err(format!("Expected MissingExtension, got {:?}", other)),
    }
}

#[test]
fn load_config_reports_parse_errors() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "requests = [").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::ParseToml { .. })) => Ok(()),
        other => Err(format!("Expected ParseToml, got {:?}", other)),
    }
}

#[test]
fn apply_config_fills_unset_options() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["hitbench"])?;
    let config = ConfigFile {
        mode: Some(BenchMode::Write),
        requests: Some(40),
        clients: Some(4),
        status: Some(202),
        read_timeout: Some(super::types::DurationValue::Text("2s".to_owned())),
        verbose: Some(true),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| format!("apply failed: {}", err))?;

    let checks = [
        (args.mode == BenchMode::Write, "Unexpected mode"),
        (args.requests.get() == 40, "Unexpected requests"),
        (args.clients.get() == 4, "Unexpected clients"),
        (args.expected_status == Some(202), "Unexpected status"),
        (
            args.read_timeout == Duration::from_secs(2),
            "Unexpected read_timeout",
        ),
        (
            args.write_timeout == Duration::from_millis(500),
            "write_timeout should keep its default",
        ),
        (args.verbose, "Expected verbose"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(message.to_owned());
        }
    }
    Ok(())
}

#[test]
fn apply_config_keeps_cli_values() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["hitbench", "-n", "7", "--mode", "read"])?;
    let config = ConfigFile {
        mode: Some(BenchMode::Write),
        requests: Some(40),
        url: Some("http://other:1/db".to_owned()),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| format!("apply failed: {}", err))?;

    if args.requests.get() != 7 || args.mode != BenchMode::Read {
        return Err(format!("CLI values were overridden: {:?}", args));
    }
    if args.url != "http://other:1/db" {
        return Err(format!("Unexpected url: {}", args.url));
    }
    Ok(())
}

#[test]
fn apply_config_rejects_out_of_range_values() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["hitbench"])?;
    let zero_clients = ConfigFile {
        clients: Some(0),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &zero_clients) {
        Err(AppError::Config(ConfigError::FieldMustBePositive { field, .. }))
            if field == "clients" => {}
        other => return Err(format!("Expected FieldMustBePositive, got {:?}", other)),
    }

    let zero_timeout = ConfigFile {
        connect_timeout: Some(super::types::DurationValue::Seconds(0)),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &zero_timeout) {
        Err(AppError::Config(ConfigError::InvalidDuration { field, .. }))
            if field == "connect_timeout" => {}
        other => return Err(format!("Expected InvalidDuration, got {:?}", other)),
    }

    let bad_status = ConfigFile {
        status: Some(7),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &bad_status) {
        Err(AppError::Config(ConfigError::InvalidStatus { .. })) => Ok(()),
        other => Err(format!("Expected InvalidStatus, got {:?}", other)),
    }
}
