use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, PositiveU64, PositiveUsize, parse_status_code};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// Options given on the command line win over the file.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut BenchArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "mode")
        && let Some(mode) = config.mode
    {
        args.mode = mode;
    }

    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = url;
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = ensure_positive_u64(requests, "requests")?;
    }

    if !is_cli(matches, "clients")
        && let Some(clients) = config.clients
    {
        args.clients = ensure_positive_usize(clients, "clients")?;
    }

    if !is_cli(matches, "expected_status")
        && let Some(status) = config.status
    {
        parse_status_code(status)
            .map_err(|err| AppError::config(ConfigError::InvalidStatus { source: err }))?;
        args.expected_status = Some(status);
    }

    if !is_cli(matches, "data_file")
        && let Some(data_file) = config.data_file.clone()
    {
        args.data_file = data_file;
    }

    if !is_cli(matches, "id_range")
        && let Some(id_range) = config.id_range
    {
        args.id_range = ensure_positive_u64(id_range, "id_range")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = ensure_duration(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "read_timeout")
        && let Some(timeout) = config.read_timeout.as_ref()
    {
        args.read_timeout = ensure_duration(timeout, "read_timeout")?;
    }

    if !is_cli(matches, "write_timeout")
        && let Some(timeout) = config.write_timeout.as_ref()
    {
        args.write_timeout = ensure_duration(timeout, "write_timeout")?;
    }

    if !is_cli(matches, "print_urls")
        && let Some(print_urls) = config.print_urls
    {
        args.print_urls = print_urls;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_duration(value: &DurationValue, field: &str) -> AppResult<Duration> {
    value.to_duration().map_err(|err| {
        AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source: err,
        })
    })
}
