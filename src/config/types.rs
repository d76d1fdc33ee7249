use serde::Deserialize;
use std::time::Duration;

use crate::args::{BenchMode, OutputFormat, parse_duration};
use crate::error::ValidationError;

/// Every field mirrors a CLI option of the same name.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub mode: Option<BenchMode>,
    pub url: Option<String>,
    pub requests: Option<u64>,
    pub clients: Option<usize>,
    pub status: Option<u16>,
    pub data_file: Option<String>,
    pub id_range: Option<u64>,
    pub connect_timeout: Option<DurationValue>,
    pub read_timeout: Option<DurationValue>,
    pub write_timeout: Option<DurationValue>,
    pub print_urls: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
}

/// A bare number of seconds or a string such as `"500ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
