//! # Variant Builder CLI
//!
//! Generates product variant combinations from an option set and resolves
//! the selection into the variant list to persist.
//!
//! ## Usage
//! ```bash
//! # Every combination, annotated against the existing variants
//! variant-builder generate --input product.json
//!
//! # Only new combinations containing "blue", sorted by title
//! variant-builder generate --input product.json --status new --search blue
//!
//! # Second page of 100
//! variant-builder generate --input product.json --page 2 --per-page 100
//!
//! # Merge, leaving out one combination and every XL combination
//! cat product.json | variant-builder resolve --mode merge \
//!     --deselect "v-red|v-m" --deselect-value v-xl
//! ```
//!
//! ## Flow
//! ```text
//! ┌──────────────┐    ┌─────────────────┐    ┌──────────────────┐    ┌────────┐
//! │ input JSON   │───►│ VariantBuilder  │───►│ selection edits  │───►│ report │
//! │ (file/stdin) │    │ generate+match  │    │ (resolve only)   │    │ stdout │
//! └──────────────┘    └─────────────────┘    └──────────────────┘    └────────┘
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the default `info` filter.

mod commands;
mod config;
mod error;
mod input;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use variant_core::{ComboFilter, ComboSort, ResolveMode, StatusFilter};

use crate::commands::{Paging, SelectionEdits};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::input::BuilderInput;

#[derive(Debug, Parser)]
#[command(name = "variant-builder", version, about = "Product variant combination engine")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Validate the option set before generating
    #[arg(long, global = true)]
    strict: bool,

    /// Single-line JSON output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every combination with its existing/new status
    Generate {
        /// Input JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Case-insensitive search over title and combo id
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,

        #[arg(long, value_enum, default_value_t = SortArg::Title)]
        sort: SortArg,

        /// Print only this page of the view (1-based)
        #[arg(long)]
        page: Option<usize>,

        #[arg(long, default_value_t = 50, requires = "page")]
        per_page: usize,
    },

    /// Resolve the selection into the variant list to persist
    Resolve {
        /// Input JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// regenerate | merge
        #[arg(short, long, default_value = "regenerate")]
        mode: ResolveMode,

        /// Combo id to deselect (repeatable)
        #[arg(long = "deselect")]
        deselect: Vec<String>,

        /// Option value id whose combos are all deselected (repeatable)
        #[arg(long = "deselect-value")]
        deselect_values: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    All,
    Selected,
    New,
    Existing,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Selected => StatusFilter::Selected,
            StatusArg::New => StatusFilter::New,
            StatusArg::Existing => StatusFilter::Existing,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Title,
    Status,
}

impl From<SortArg> for ComboSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => ComboSort::Title,
            SortArg::Status => ComboSort::Status,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "variant-builder failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber on stderr so stdout stays pure JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = CliConfig::load(cli.config)?;
    if cli.strict {
        config.output.strict = true;
    }
    if cli.compact {
        config.output.pretty = false;
    }
    debug!(?config, "Configuration resolved");

    match cli.command {
        Command::Generate {
            input,
            search,
            status,
            sort,
            page,
            per_page,
        } => {
            let input = BuilderInput::read(&input)?;
            let filter = ComboFilter {
                search,
                status: status.into(),
            };
            let paging = page.map(|page| Paging { page, per_page });
            let report = commands::generate(&config, input, &filter, sort.into(), paging)?;
            print_json(&report, config.output.pretty)
        }
        Command::Resolve {
            input,
            mode,
            deselect,
            deselect_values,
        } => {
            let input = BuilderInput::read(&input)?;
            let edits = SelectionEdits {
                deselect,
                deselect_values,
            };
            let report = commands::resolve(&config, input, mode, &edits)?;
            print_json(&report, config.output.pretty)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_args() {
        let cli = Cli::try_parse_from([
            "variant-builder",
            "--compact",
            "resolve",
            "--input",
            "product.json",
            "--mode",
            "merge",
            "--deselect",
            "v-red|v-m",
            "--deselect-value",
            "v-xl",
            "--deselect-value",
            "v-xs",
        ])
        .unwrap();

        assert!(cli.compact);
        match cli.command {
            Command::Resolve {
                mode,
                deselect,
                deselect_values,
                ..
            } => {
                assert_eq!(mode, ResolveMode::Merge);
                assert_eq!(deselect, ["v-red|v-m"]);
                assert_eq!(deselect_values, ["v-xl", "v-xs"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = Cli::try_parse_from(["variant-builder", "resolve", "--mode", "upsert"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["variant-builder", "generate"]).unwrap();
        match cli.command {
            Command::Generate {
                input,
                search,
                status,
                sort,
                page,
                ..
            } => {
                assert_eq!(input, PathBuf::from("-"));
                assert_eq!(page, None);
                assert!(search.is_empty());
                assert_eq!(StatusFilter::from(status), StatusFilter::All);
                assert_eq!(ComboSort::from(sort), ComboSort::Title);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
