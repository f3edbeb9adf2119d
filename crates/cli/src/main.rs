mod cli;

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use quotebar_core::{Config, Error as QuoteError};
use quotebar_service::{to_json, DailyQuoteService, JsonPayloadSource};

use crate::cli::{BarsArgs, Cli, Command, InfoArgs};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(exit_code(&error));
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Validation failures exit with 2, everything else with 1.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<QuoteError>() {
        Some(err) if err.is_validation() => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Command::Bars(args) => run_bars(&args),
        Command::Info(args) => run_info(&args),
    }
}

fn run_bars(args: &BarsArgs) -> Result<String> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let payload = read_input(&args.input)?;
    let source = JsonPayloadSource::from_daily_payload(&payload)
        .with_context(|| format!("parsing daily quotes from {}", args.input))?;
    let service = DailyQuoteService::new(source, config);
    let request = service.request(
        &args.code,
        args.from.as_deref(),
        args.to.as_deref(),
        args.interval.as_deref(),
    )?;
    debug!(
        query = %request.query_string(),
        interval = %request.interval,
        "serving recorded payload"
    );

    let bars = service.daily_bars(&request)?;
    Ok(to_json(&bars, args.pretty)?)
}

fn run_info(args: &InfoArgs) -> Result<String> {
    let payload = read_input(&args.input)?;
    let source = JsonPayloadSource::from_listed_payload(&payload)
        .with_context(|| format!("parsing listed info from {}", args.input))?;
    let directory = DailyQuoteService::new(source, Config::default()).listed_stocks()?;
    Ok(to_json(&directory, args.pretty)?)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(input).with_context(|| format!("reading {input}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let validation = anyhow::Error::new(QuoteError::invalid_interval("yearly"));
        assert_eq!(exit_code(&validation), 2);

        let wrapped = anyhow::Error::new(QuoteError::invalid_date("2024/01/01")).context("bars");
        assert_eq!(exit_code(&wrapped), 2);

        let source = anyhow::Error::new(QuoteError::source("upstream down"));
        assert_eq!(exit_code(&source), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("io")), 1);
    }

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("quotebar-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn bars_args(input: &std::path::Path, interval: Option<&str>) -> BarsArgs {
        BarsArgs {
            input: input.display().to_string(),
            code: "7203".to_string(),
            from: Some("20240101".to_string()),
            to: Some("20240131".to_string()),
            interval: interval.map(str::to_string),
            config: None,
            pretty: false,
        }
    }

    const PAYLOAD: &str = r#"{"daily_quotes": [
        {"Date": "2024-01-05", "Code": "72030", "Close": 2.0, "Volume": 10},
        {"Date": "2024-01-04", "Code": "72030", "Close": 1.0, "Volume": 10}
    ]}"#;

    #[test]
    fn test_bars_from_file() {
        let input = temp_file("bars.json", PAYLOAD);
        let output = run_bars(&bars_args(&input, Some("weekly"))).unwrap();
        fs::remove_file(&input).unwrap();

        let bars: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(bars.as_array().unwrap().len(), 1);
        assert_eq!(bars[0]["Date"], "2024-01-05");
        assert_eq!(bars[0]["Volume"], 20.0);
        assert_eq!(bars[0]["interval"], "weekly");
    }

    #[test]
    fn test_bars_rejects_bad_interval() {
        let input = temp_file("interval.json", PAYLOAD);
        let err = run_bars(&bars_args(&input, Some("hourly"))).unwrap_err();
        fs::remove_file(&input).unwrap();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_bars_uses_config_file() {
        let input = temp_file("config-input.json", PAYLOAD);
        let config = temp_file(
            "config.json",
            r#"{"engine": {"interval": "monthly"},
                "request": {"from_date": "20240101", "to_date": "20240331"}}"#,
        );

        let mut args = bars_args(&input, None);
        args.from = None;
        args.to = None;
        args.config = Some(config.clone());
        let output = run_bars(&args).unwrap();

        let bars: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(bars[0]["interval"], "monthly");

        // The configured range still bounds an explicit `--to`.
        args.to = Some("20231231".to_string());
        let err = run_bars(&args).unwrap_err();
        fs::remove_file(&input).unwrap();
        fs::remove_file(&config).unwrap();

        assert!(matches!(
            err.downcast_ref::<QuoteError>(),
            Some(QuoteError::InvalidRange { .. })
        ));
        assert_eq!(exit_code(&err), 2);
    }
}
