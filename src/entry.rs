use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_load;
use crate::args::{DEFAULT_CONFIG_FILES, LoadArgs};
use crate::config::{RunConfig, apply_config, load_config, load_dictionary, read_request_body};
use crate::console::Console;
use crate::error::{AppError, AppResult, HttpError};
use crate::http::{ReqwestTransport, build_client};
use crate::logger::init_logging;
use crate::shutdown::{CancelFlag, spawn_signal_handler};

pub(crate) fn run() -> AppResult<()> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(());
    };

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::http(HttpError::BuildRuntimeFailed { source: err }))?;

    execute(&args, &runtime).inspect_err(|err| tracing::error!("{}", err))
}

fn parse_args() -> AppResult<Option<(LoadArgs, ArgMatches)>> {
    let mut cmd = LoadArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

fn execute(args: &LoadArgs, runtime: &tokio::runtime::Runtime) -> AppResult<()> {
    let dictionary = match args.dictionary.as_deref() {
        Some(path) => load_dictionary(Path::new(path))?,
        None => Vec::new(),
    };
    let body = read_request_body(args)?;
    let config = RunConfig::from_args(args, body.as_deref(), dictionary)?;

    let client = build_client(&config)?;
    let transport = ReqwestTransport::new(client, runtime.handle().clone());
    let cancel = CancelFlag::new();
    let signals = spawn_signal_handler(runtime.handle(), cancel.clone());
    let console = Console::stdout();

    let result = run_load(&config, &transport, &console, &cancel);
    signals.abort();
    result.map(|report| {
        if !report.finished {
            tracing::info!("Run cancelled before all requests completed.");
        }
    })
}
