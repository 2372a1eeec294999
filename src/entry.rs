use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::error;

use crate::args::{DEFAULT_CONFIG_FILES, OutputFormat, TesterArgs};
use crate::config::{RunConfig, apply_config, load_config};
use crate::error::AppResult;
use crate::load::run_load;
use crate::report::{TextReport, render_json};
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;

/// Parses the command line, runs the load test, and prints the report.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, and for failures
/// that abort the run.
pub fn run() -> AppResult<()> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(());
    };

    crate::logger::init_logging(args.verbose);

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    let run_config = RunConfig::from_args(&args).inspect_err(|err| {
        error!("Invalid run configuration: {}", err);
    })?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(cpus) = args.cpus {
        runtime_builder.worker_threads(cpus.get());
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(run_async(run_config, args.output_format))
}

fn parse_args() -> AppResult<Option<(TesterArgs, ArgMatches)>> {
    let mut cmd = TesterArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = TesterArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(config: RunConfig, output_format: OutputFormat) -> AppResult<()> {
    if output_format == OutputFormat::Text {
        println!(
            "Running {}s test @ {}\n  {} connection(s) running concurrently",
            config.duration_secs(),
            config.request.url,
            config.workers
        );
    }

    let (interrupt_tx, interrupt_rx) = shutdown_channel();
    let (done_tx, done_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&interrupt_tx, done_rx);

    let result = run_load(config, interrupt_rx).await;

    drop(done_tx.send(()));
    signal_handle.await?;

    let report = result?;
    match output_format {
        OutputFormat::Text => print!("{}", TextReport(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}
