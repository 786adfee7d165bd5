use clap::{ArgMatches, CommandFactory, FromArgMatches};
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

use super::types::DurationValue;
use super::{RunConfig, apply_config, load_config_file, load_dictionary, read_request_body};
use crate::args::{HttpMethod, LoadArgs};
use crate::error::{AppError, AppResult, ConfigError, HttpError, ValidationError};

fn cli<const N: usize>(argv: [&str; N]) -> AppResult<(LoadArgs, ArgMatches)> {
    let matches = LoadArgs::command().try_get_matches_from(argv)?;
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn write_file(path: &Path, content: &str) -> AppResult<()> {
    std::fs::write(path, content)?;
    Ok(())
}

#[test]
fn parse_toml_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("esperf.toml");
    write_file(
        &path,
        r#"
url = "http://localhost:9200/_search?q=$RDICT"
method = "post"
workers = 8
iterations = 25
interval = "500ms"
warmup = 3
user = "elastic:changeme"
dict = "words.txt"
"#,
    )?;

    let config = load_config_file(&path)?;
    if config.url.as_deref() != Some("http://localhost:9200/_search?q=$RDICT") {
        return Err(AppError::config("Unexpected url"));
    }
    if config.method != Some(HttpMethod::Post) {
        return Err(AppError::config("Unexpected method"));
    }
    if config.workers != Some(8) || config.iterations != Some(25) {
        return Err(AppError::config("Unexpected workers/iterations"));
    }
    if config.interval != Some(DurationValue::Text("500ms".to_owned())) {
        return Err(AppError::config("Unexpected interval"));
    }
    if config.warmup != Some(DurationValue::Seconds(3)) {
        return Err(AppError::config("Unexpected warmup"));
    }
    Ok(())
}

#[test]
fn parse_json_config_with_aliases() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("esperf.json");
    write_file(
        &path,
        r#"{ "url": "http://localhost", "threads": 2, "recurrence": 4, "verbose": true }"#,
    )?;

    let config = load_config_file(&path)?;
    if config.workers != Some(2) || config.iterations != Some(4) {
        return Err(AppError::config("Unexpected aliased values"));
    }
    if config.verbose != Some(true) {
        return Err(AppError::config("Expected verbose"));
    }
    Ok(())
}

#[test]
fn unknown_keys_and_extensions_are_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let unknown = dir.path().join("esperf.toml");
    write_file(&unknown, "rate = 10\n")?;
    match load_config_file(&unknown) {
        Err(AppError::Config(ConfigError::ParseToml { .. })) => {}
        Ok(_) | Err(_) => return Err(AppError::config("Expected TOML parse error")),
    }

    let yaml = dir.path().join("esperf.yaml");
    write_file(&yaml, "url: x\n")?;
    match load_config_file(&yaml) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Ok(_) | Err(_) => Err(AppError::config("Expected unsupported extension")),
    }
}

#[test]
fn config_fills_values_missing_from_cli() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("esperf.toml");
    write_file(
        &path,
        r#"
url = "http://from-config"
workers = 3
warmup = "2s"
timeout = "30s"
"#,
    )?;
    let config = load_config_file(&path)?;
    let (mut args, matches) = cli(["esperf"])?;

    apply_config(&mut args, &matches, &config)?;

    if args.url.as_deref() != Some("http://from-config") {
        return Err(AppError::config("Expected url from config"));
    }
    if args.workers.get() != 3 {
        return Err(AppError::config("Expected workers from config"));
    }
    if args.warmup != Duration::from_secs(2) {
        return Err(AppError::config("Expected warmup from config"));
    }
    if args.request_timeout != Duration::from_secs(30) {
        return Err(AppError::config("Expected timeout from config"));
    }
    if args.iterations.get() != 10 {
        return Err(AppError::config("Expected default iterations"));
    }
    Ok(())
}

#[test]
fn cli_values_win_over_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("esperf.toml");
    write_file(
        &path,
        r#"
url = "http://from-config"
workers = 3
data = "{}"
"#,
    )?;
    let config = load_config_file(&path)?;
    let (mut args, matches) = cli([
        "esperf",
        "-t",
        "9",
        "--data-file",
        "body.json",
        "http://from-cli",
    ])?;

    apply_config(&mut args, &matches, &config)?;

    if args.url.as_deref() != Some("http://from-cli") {
        return Err(AppError::config("Expected CLI url"));
    }
    if args.workers.get() != 9 {
        return Err(AppError::config("Expected CLI workers"));
    }
    if args.data.is_some() || args.data_file.as_deref() != Some("body.json") {
        return Err(AppError::config("Expected CLI body source to win"));
    }
    Ok(())
}

#[test]
fn config_rejects_zero_and_conflicts() -> AppResult<()> {
    let dir = tempdir()?;

    let zero_workers = dir.path().join("zero.toml");
    write_file(&zero_workers, "workers = 0\n")?;
    let config = load_config_file(&zero_workers)?;
    let (mut args, matches) = cli(["esperf"])?;
    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::FieldMustBePositive { field, .. })) if field == "workers" => {}
        Ok(()) | Err(_) => return Err(AppError::config("Expected workers >= 1 error")),
    }

    let zero_interval = dir.path().join("interval.toml");
    write_file(&zero_interval, "interval = 0\n")?;
    let config = load_config_file(&zero_interval)?;
    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::InvalidDuration { field, .. })) if field == "interval" => {}
        Ok(()) | Err(_) => return Err(AppError::config("Expected zero interval error")),
    }

    let zero_warmup = dir.path().join("warmup.toml");
    write_file(&zero_warmup, "warmup = 0\n")?;
    let config = load_config_file(&zero_warmup)?;
    apply_config(&mut args, &matches, &config)?;

    let both_bodies = dir.path().join("bodies.toml");
    write_file(&both_bodies, "data = \"{}\"\ndata_file = \"x.json\"\n")?;
    let config = load_config_file(&both_bodies)?;
    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::ConflictingFields { .. })) => Ok(()),
        Ok(()) | Err(_) => Err(AppError::config("Expected data/data_file conflict")),
    }
}

#[test]
fn dictionary_lines_are_kept_verbatim() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("words.txt");
    write_file(&path, "alpha\r\n beta \n\ngamma")?;

    let words = load_dictionary(&path)?;
    let expected = ["alpha", " beta ", "", "gamma"];
    if words != expected {
        return Err(AppError::config(format!("Unexpected words: {:?}", words)));
    }

    let empty = dir.path().join("empty.txt");
    write_file(&empty, "")?;
    if !load_dictionary(&empty)?.is_empty() {
        return Err(AppError::config("Expected empty dictionary"));
    }

    match load_dictionary(&dir.path().join("missing.txt")) {
        Err(AppError::Http(HttpError::ReadDictionary { .. })) => Ok(()),
        Ok(_) | Err(_) => Err(AppError::config("Expected dictionary read error")),
    }
}

#[test]
fn request_body_prefers_inline_data_then_file() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("body.json");
    write_file(&path, "{\"size\": $RNUM(10)}")?;

    let (args, _) = cli(["esperf", "--data", "{\"q\":1}", "http://localhost"])?;
    if read_request_body(&args)?.as_deref() != Some("{\"q\":1}") {
        return Err(AppError::config("Expected inline body"));
    }

    let path_text = path.to_string_lossy().into_owned();
    let (args, _) = cli(["esperf", "--data-file", path_text.as_str(), "http://localhost"])?;
    if read_request_body(&args)?.as_deref() != Some("{\"size\": $RNUM(10)}") {
        return Err(AppError::config("Expected file body"));
    }

    let (args, _) = cli(["esperf", "--data", "", "http://localhost"])?;
    if read_request_body(&args)?.is_some() {
        return Err(AppError::config("Expected empty body to be treated as none"));
    }
    Ok(())
}

#[test]
fn run_config_requires_url() -> AppResult<()> {
    let (args, _) = cli(["esperf"])?;
    match RunConfig::from_args(&args, None, Vec::new()) {
        Err(AppError::Validation(ValidationError::MissingUrl)) => Ok(()),
        Ok(_) | Err(_) => Err(AppError::config("Expected MissingUrl")),
    }
}

#[test]
fn run_config_rejects_rdict_without_dictionary() -> AppResult<()> {
    let (args, _) = cli(["esperf", "http://localhost/$RDICT"])?;
    match RunConfig::from_args(&args, None, Vec::new()) {
        Err(AppError::Validation(ValidationError::DictionaryRequired { field: "URL" })) => {}
        Ok(_) | Err(_) => return Err(AppError::config("Expected URL dictionary error")),
    }

    let (args, _) = cli(["esperf", "http://localhost/"])?;
    match RunConfig::from_args(&args, Some("{\"q\":\"$RDICT\"}"), Vec::new()) {
        Err(AppError::Validation(ValidationError::DictionaryRequired { field: "body" })) => {}
        Ok(_) | Err(_) => return Err(AppError::config("Expected body dictionary error")),
    }

    let (args, _) = cli(["esperf", "http://localhost/$RDICT"])?;
    RunConfig::from_args(&args, None, vec!["word".to_owned()])?;
    Ok(())
}

#[test]
fn run_config_resolves_totals_and_credentials() -> AppResult<()> {
    let (args, _) = cli([
        "esperf",
        "-t",
        "4",
        "-r",
        "25",
        "-u",
        "elastic:secret",
        "http://localhost/$RNUM",
    ])?;
    let config = RunConfig::from_args(&args, None, Vec::new())?;
    if config.total_requests() != 100 {
        return Err(AppError::config(format!(
            "Unexpected total: {}",
            config.total_requests()
        )));
    }
    let auth = config
        .basic_auth
        .as_ref()
        .ok_or_else(|| AppError::config("Expected credentials"))?;
    if auth.username != "elastic" || auth.password != "secret" {
        return Err(AppError::config("Unexpected credentials"));
    }

    let (args, _) = cli(["esperf", "-u", "nocolon", "http://localhost"])?;
    match RunConfig::from_args(&args, None, Vec::new()) {
        Err(AppError::Validation(ValidationError::InvalidCredentials { .. })) => Ok(()),
        Ok(_) | Err(_) => Err(AppError::config("Expected InvalidCredentials")),
    }
}
