//! Inspector CLI for cassette files.
//!
//! Usage: `tapedeck <list|show|append> <cassette> [...]`

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use tapedeck::{Record, Storage, YamlStorage};

/// Top-level CLI parser for `tapedeck`.
#[derive(Debug, Parser)]
#[command(name = "tapedeck", version, about = "Inspect and append to cassette files")]
struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List the records on a cassette, one line per position.
    List {
        /// Path to the cassette file.
        cassette: PathBuf,
    },
    /// Print the record at a position.
    Show {
        /// Path to the cassette file.
        cassette: PathBuf,
        /// 0-based record position.
        position: usize,
        /// Print JSON instead of YAML.
        #[arg(long)]
        json: bool,
    },
    /// Append one YAML record read from stdin.
    Append {
        /// Path to the cassette file.
        cassette: PathBuf,
    },
}

/// One-line request summary for `list` output.
fn summarize_request(record: &Record) -> String {
    let Some(request) = record.request() else {
        return "(no request)".into();
    };
    if let Some(text) = request.as_str() {
        return text.to_string();
    }
    let method = request.get("method").and_then(|v| v.as_str()).unwrap_or("?");
    let url = request.get("url").and_then(|v| v.as_str()).unwrap_or("?");
    format!("{method} {url}")
}

fn run(cli: Cli) -> tapedeck::Result<()> {
    match cli.command {
        Command::List { cassette } => {
            let mut store = YamlStorage::open(&cassette)?;
            while store.valid()? {
                match store.current()? {
                    Some(record) => {
                        println!("{}: {}", store.position(), summarize_request(&record));
                    }
                    None => println!("{}: (empty)", store.position()),
                }
                store.advance();
            }
            Ok(())
        }
        Command::Show { cassette, position, json } => {
            let mut store = YamlStorage::open(&cassette)?;
            for _ in 0..position {
                store.advance();
            }
            let Some(record) = store.current()? else {
                return Err(std::io::Error::other(format!(
                    "no record at position {position} in {}",
                    cassette.display()
                ))
                .into());
            };
            if json {
                let rendered =
                    serde_json::to_string_pretty(&record).map_err(std::io::Error::other)?;
                println!("{rendered}");
            } else {
                print!("{}", serde_yaml::to_string(&record)?);
            }
            Ok(())
        }
        Command::Append { cassette } => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            let record: Record = serde_yaml::from_str(&text)?;
            let mut store = YamlStorage::open(&cassette)?;
            store.append(&record)?;
            println!("Appended record to {}", cassette.display());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::parse_from(["tapedeck", "list", "session.yaml"]);
        assert!(matches!(cli.command, Command::List { .. }));
    }

    #[test]
    fn parses_show_with_json_flag() {
        let cli = Cli::parse_from(["tapedeck", "show", "session.yaml", "2", "--json"]);
        match cli.command {
            Command::Show { position, json, .. } => {
                assert_eq!(position, 2);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn summarizes_mapping_and_string_requests() {
        let mapped = Record::from_pairs([(
            "request",
            serde_yaml::from_str::<Value>("{method: GET, url: /health}").unwrap(),
        )]);
        assert_eq!(summarize_request(&mapped), "GET /health");

        let plain = Record::from_pairs([("request", Value::String("GET /plain".into()))]);
        assert_eq!(summarize_request(&plain), "GET /plain");

        assert_eq!(summarize_request(&Record::new()), "(no request)");
    }
}
