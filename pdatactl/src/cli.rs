use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pdata::Format;

use crate::constants::{ENV_CONFIG, ENV_FORMAT};

#[derive(Parser)]
#[command(name = "pdatactl")]
#[command(version, about = "Inspect and convert OTLP metrics payloads", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "pdata=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Format used when a command does not name one (proto, json, otlp-v1)
    #[arg(long, global = true, env = ENV_FORMAT, value_parser = parse_format)]
    pub default_format: Option<Format>,

    /// Indent JSON output
    #[arg(long, global = true)]
    pub pretty: Option<bool>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Print resource, metric and data point counts of a payload
    Inspect {
        /// Input file, or "-" for stdin
        input: PathBuf,

        /// Input format
        #[arg(long, short = 'f', value_parser = parse_format)]
        format: Option<Format>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a payload in one format and encode it in another
    Convert {
        /// Input file, or "-" for stdin
        input: PathBuf,

        /// Output file, or "-" for stdout
        output: PathBuf,

        /// Input format
        #[arg(long, value_parser = parse_format)]
        from: Option<Format>,

        /// Output format
        #[arg(long, value_parser = parse_format)]
        to: Option<Format>,
    },
}

fn parse_format(s: &str) -> Result<Format, String> {
    s.parse::<Format>().map_err(|e| e.to_string())
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub log_level: Option<String>,
    pub default_format: Option<Format>,
    pub pretty: Option<bool>,
}

pub fn parse() -> (CliConfig, Commands) {
    split(Cli::parse())
}

fn split(cli: Cli) -> (CliConfig, Commands) {
    let config = CliConfig {
        config: cli.config,
        log_level: cli.log_level,
        default_format: cli.default_format,
        pretty: cli.pretty,
    };
    (config, cli.command)
}
