use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_BASE_URL, DEFAULT_CLIENTS, DEFAULT_CONNECT_TIMEOUT, DEFAULT_DATA_FILE,
    DEFAULT_ID_RANGE, DEFAULT_READ_TIMEOUT, DEFAULT_REQUESTS, DEFAULT_WRITE_TIMEOUT,
};
use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_positive_u64, parse_positive_usize,
    parse_status_arg,
};
use super::types::{BenchMode, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Closed-loop HTTP benchmark for a document database: a fixed number of keep-alive clients split a fixed request budget and report successes, failures, and bytes moved."
)]
pub struct BenchArgs {
    /// Traffic shape: random document reads or document writes
    #[arg(long, short = 'm', value_enum, default_value = "read", ignore_case = true)]
    pub mode: BenchMode,

    /// Database base URL; requests go to <url>/docs?id=disks/...
    #[arg(long, short, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Total number of requests, split evenly across clients
    #[arg(long, short = 'n', default_value = DEFAULT_REQUESTS, value_parser = parse_positive_u64)]
    pub requests: PositiveU64,

    /// Number of concurrent clients, each with one keep-alive connection
    #[arg(long, short = 'c', default_value = DEFAULT_CLIENTS, value_parser = parse_positive_usize)]
    pub clients: PositiveUsize,

    /// Expected response status (defaults to 200 for reads, 201 for writes)
    #[arg(long = "status", short = 's', value_parser = parse_status_arg)]
    pub expected_status: Option<u16>,

    /// Request body file for write runs
    #[arg(long = "data-file", short = 'D', default_value = DEFAULT_DATA_FILE)]
    pub data_file: String,

    /// Read runs pick document ids uniformly from [0, id-range)
    #[arg(long = "id-range", default_value = DEFAULT_ID_RANGE, value_parser = parse_positive_u64)]
    pub id_range: PositiveU64,

    /// DNS resolution plus TCP connect limit (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = DEFAULT_CONNECT_TIMEOUT, value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Response read limit (supports ms/s/m/h)
    #[arg(long = "read-timeout", default_value = DEFAULT_READ_TIMEOUT, value_parser = parse_duration_arg)]
    pub read_timeout: Duration,

    /// Request write limit (supports ms/s/m/h)
    #[arg(long = "write-timeout", default_value = DEFAULT_WRITE_TIMEOUT, value_parser = parse_duration_arg)]
    pub write_timeout: Duration,

    /// Print every request URL before it is sent
    #[arg(long = "print-urls")]
    pub print_urls: bool,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Config file (.toml or .json); defaults to hitbench.toml or hitbench.json if present
    #[arg(long)]
    pub config: Option<String>,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by HITBENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
