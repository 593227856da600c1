use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::info;

use gt06_decoder::service::DEFAULT_MAX_BODY_BYTES;
use gt06_decoder::{handle_request, RequestLimits, ResponseMode};

/// Decode GT06 tracker frames, one hex frame per line, into JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Capture file to read; stdin when absent or `-`
    input: Option<PathBuf>,

    /// Response shape
    #[arg(short, long, default_value_t, value_enum)]
    mode: ResponseMode,

    /// Largest accepted input in bytes, 0 for no limit
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Pretty-print the JSON output
    #[arg(short, long, default_value_t = false)]
    pretty: bool,
}

fn read_body(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("failed to read stdin")?;
            Ok(body)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let body = read_body(cli.input.as_ref())?;
    let limits = RequestLimits {
        max_body_bytes: cli.max_body_bytes,
    };

    let response = handle_request(&body, cli.mode, &limits)?;
    info!("{} records", response.records().len());

    let json = if cli.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .context("failed to serialize response")?;
    println!("{json}");

    Ok(())
}
