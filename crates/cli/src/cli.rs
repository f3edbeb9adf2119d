use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "quotebar", version, about = "Build enriched price bars from daily quotes")]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the bar series from a daily-quotes payload.
    Bars(BarsArgs),
    /// Normalize a listed-info payload into the stock directory.
    Info(InfoArgs),
}

#[derive(Debug, Args)]
pub struct BarsArgs {
    /// Payload file, or `-` for stdin.
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Instrument code the payload was recorded for.
    #[arg(long)]
    pub code: String,

    /// First date, YYYY-MM-DD or YYYYMMDD. Defaults to the config file.
    #[arg(long)]
    pub from: Option<String>,

    /// Last date, YYYY-MM-DD or YYYYMMDD. Defaults to the config file.
    #[arg(long)]
    pub to: Option<String>,

    /// daily, weekly or monthly. Overrides the config file.
    #[arg(long)]
    pub interval: Option<String>,

    /// JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Payload file, or `-` for stdin.
    #[arg(short, long, default_value = "-")]
    pub input: String,

    #[arg(long)]
    pub pretty: bool,
}
