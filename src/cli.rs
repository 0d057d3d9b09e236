use crate::fetch::fetch_with_options;
use crate::log::ActivityLogger;
use crate::types::{GetOptions, HeaderSet};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::time::Instant;
use url::Url;

#[derive(Parser)]
#[command(name = "qget", version, about = "Fetch a URL and print the buffered body")]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a URL and write the body to stdout
    Get(GetArgs),
    /// Show recent fetch activity
    Log(LogArgs),
}

#[derive(Args)]
struct GetArgs {
    /// URL to fetch. `https://`-prefixed URLs use the TLS transport,
    /// everything else goes over plain HTTP.
    url: String,
    /// Extra request header as `Name: value` (repeatable)
    #[arg(long = "header", value_name = "NAME: VALUE")]
    headers: Vec<String>,
}

#[derive(Args)]
struct LogArgs {
    /// Only show failed fetches
    #[arg(long)]
    errors: bool,
    /// Only show entries mentioning this host
    #[arg(long)]
    host: Option<String>,
}

pub fn run() {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => get_cmd(args),
        Command::Log(args) => log_cmd(args),
    }
}

// Logging must never break the fetch itself.
fn log_info(host: Option<&str>, event: &str, details: Option<&str>) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.info(host, event, details);
    }
}

fn log_error(host: Option<&str>, event: &str, details: Option<&str>) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.error(host, event, details);
    }
}

fn get_cmd(args: GetArgs) {
    let opts = match parse_options(&args.headers) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("Error: {msg}");
            std::process::exit(2);
        }
    };

    // Host label for the activity log only; dispatch never parses the URL.
    let host = Url::parse(&args.url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()));

    let start = Instant::now();
    let result = crate::runtime::block_on(fetch_with_options(&args.url, &opts));
    let duration = start.elapsed();

    match result {
        Ok(body) => {
            let details = format!(
                "succeeded in {}ms ({} bytes)",
                duration.as_millis(),
                body.len()
            );
            log_info(host.as_deref(), "get", Some(&details));

            let mut out = std::io::stdout();
            if out.write_all(body.as_bytes()).and_then(|_| out.flush()).is_err() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            let details = format!("failed in {}ms: {}", duration.as_millis(), e);
            log_error(host.as_deref(), "get", Some(&details));

            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_options(raw: &[String]) -> Result<GetOptions, String> {
    let mut headers = HeaderSet::empty();
    for h in raw {
        let (name, value) = h
            .split_once(':')
            .ok_or_else(|| format!("invalid header {h:?}, expected `Name: value`"))?;
        headers = headers.with(name.trim(), value.trim());
    }
    Ok(GetOptions { headers })
}

fn log_cmd(args: LogArgs) {
    let result =
        ActivityLogger::new().and_then(|l| l.read_logs(args.host.as_deref(), args.errors));
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
