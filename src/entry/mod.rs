
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{debug, error, warn};

use crate::args::{BenchArgs, BenchMode, OutputFormat, parse_status_code};
use crate::bench::{Controller, RunConfig, RunOutcome};
use crate::config::{apply_config, load_config};
use crate::error::AppResult;
use crate::http::{
    FixedUrl, RandomIdUrl, RequestTarget, Timeouts, UrlSource, docs_url, load_payload,
};
use crate::report::{render_json, render_text, summary_line};
use crate::shutdown::shutdown_channel;
use crate::system::logger::init_logging;
use crate::system::shutdown_handlers::setup_signal_shutdown_handler;

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<(BenchArgs, ArgMatches)> {
    let matches = BenchArgs::command().get_matches();
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(args: BenchArgs) -> AppResult<()> {
    let config = build_run_config(&args).inspect_err(|err| error!("{}", err))?;
    let controller = Controller::new(config);

    let summary = summary_line(
        args.mode.operation(),
        args.requests.get(),
        &args.url,
        controller.plan().workers,
    );
    match args.output_format {
        OutputFormat::Text => println!("{}", summary),
        OutputFormat::Json => debug!("{}", summary),
    }

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let outcome = controller.run(&mut shutdown_rx).await;
    signal_handle.abort();

    print_report(&outcome?, &args)
}

/// Turns the final arguments into the run input.
///
/// Fails before any worker exists when the base URL is unusable or the
/// write payload cannot be read.
pub(crate) fn build_run_config(args: &BenchArgs) -> AppResult<RunConfig> {
    let base = RequestTarget::parse(&args.url)?;
    debug!("Benchmarking {}", base.endpoint);

    let docs = docs_url(&args.url);
    let (url_source, body): (Arc<dyn UrlSource>, Option<Bytes>) = match args.mode {
        BenchMode::Read => (Arc::new(RandomIdUrl::new(docs, args.id_range.get())), None),
        BenchMode::Write => {
            let payload = load_payload(Path::new(&args.data_file))?;
            (Arc::new(FixedUrl::new(docs)), Some(payload))
        }
    };
    let expected_status = match args.expected_status {
        Some(status) => parse_status_code(status)?,
        None => args.mode.default_status(),
    };

    Ok(RunConfig {
        url_source,
        method: args.mode.method(),
        body,
        expected_status,
        total_requests: args.requests.get(),
        workers: args.clients.get(),
        print_urls: args.print_urls,
        timeouts: Timeouts {
            connect: args.connect_timeout,
            read: args.read_timeout,
            write: args.write_timeout,
        },
    })
}

fn print_report(outcome: &RunOutcome, args: &BenchArgs) -> AppResult<()> {
    let report = outcome.report();
    let interrupted = outcome.is_interrupted();
    if report.has_failures() {
        warn!(
            "{} network failures and {} unexpected statuses out of {} requests.",
            report.totals.network_failed, report.totals.bad_status, report.totals.requests_attempted
        );
    }
    match args.output_format {
        OutputFormat::Text => {
            let use_color = !args.no_color && std::io::stdout().is_terminal();
            println!("{}", render_text(report, interrupted, use_color));
        }
        OutputFormat::Json => println!("{}", render_json(report, interrupted)?),
    }
    Ok(())
}
