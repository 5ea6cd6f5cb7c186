//! sf-record-id CLI
//!
//! Extract Salesforce record IDs from URLs, text, and page snapshots.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use sf_record_id::{
    extract_account_id_from_string, extract_account_id_from_url, extract_all_record_ids, locate,
    safe_decode, ContextSources, Notice, PageSnapshot, RecordId, ScanLimits,
};

#[derive(Parser)]
#[command(name = "sf-record-id", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the record ID from each input (stdin, one per line, when none given)
    Extract {
        /// How to read each input
        #[arg(short, long, value_enum, default_value_t = Mode::Url)]
        mode: Mode,

        /// Print every ID in each input instead of the best one
        #[arg(short, long)]
        all: bool,

        /// Emit one JSON object per input
        #[arg(long)]
        json: bool,

        /// URLs, paths or text to search
        #[arg(value_name = "INPUT")]
        inputs: Vec<String>,
    },

    /// Percent-decode a value, leaving malformed input unchanged
    Decode {
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Search link, page and tab URLs, selected text, then a page snapshot
    Locate {
        #[arg(long)]
        link_url: Option<String>,

        #[arg(long)]
        page_url: Option<String>,

        #[arg(long)]
        tab_url: Option<String>,

        #[arg(long)]
        selection: Option<String>,

        /// Page snapshot JSON file
        #[arg(long, value_name = "FILE")]
        page: Option<PathBuf>,

        /// Target element as dot-separated child indices from the body, e.g. 0.2.1
        #[arg(long, value_name = "PATH", value_parser = parse_target)]
        target: Option<TargetPath>,

        /// Deepest element level searched in the page snapshot
        #[arg(long, default_value_t = ScanLimits::default().max_depth)]
        max_depth: usize,

        /// Ancestors checked above the target element
        #[arg(long, default_value_t = ScanLimits::default().max_ancestors)]
        max_ancestors: usize,

        #[arg(long)]
        json: bool,
    },
}

/// Child indices from the page body to an element
#[derive(Debug, Clone)]
struct TargetPath(Vec<usize>);

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Structured URL search with text fallback
    Url,
    /// Plain first-match text search
    String,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            mode,
            all,
            json,
            inputs,
        } => run_extract(mode, all, json, inputs),
        Command::Decode { value } => {
            println!("{}", safe_decode(value.as_str()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Locate {
            link_url,
            page_url,
            tab_url,
            selection,
            page,
            target,
            max_depth,
            max_ancestors,
            json,
        } => {
            let sources = ContextSources {
                link_url,
                page_url,
                tab_url,
                selection_text: selection,
                target_element: target.map(|t| t.0),
            };
            let limits = ScanLimits {
                max_depth,
                max_ancestors,
            };
            let snapshot = page.map(PageSnapshot::from_path).transpose()?;
            run_locate(&sources, snapshot.as_ref(), &limits, json)
        }
    }
}

fn run_extract(
    mode: Mode,
    all: bool,
    json: bool,
    inputs: Vec<String>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let inputs = if inputs.is_empty() || inputs == ["-"] {
        io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        inputs
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut missing = 0usize;

    for input in &inputs {
        let ids: Vec<RecordId> = if all {
            extract_all_record_ids(input)
                .into_iter()
                .map(|found| found.id)
                .collect()
        } else {
            let id = match mode {
                Mode::Url => extract_account_id_from_url(input.as_str()),
                Mode::String => extract_account_id_from_string(input.as_str()),
            };
            id.into_iter().collect()
        };

        if ids.is_empty() {
            missing += 1;
            tracing::info!("{} in {:?}", Notice::NotFound, input);
        }

        if json {
            let record = if all {
                json!({ "input": input, "ids": ids })
            } else {
                json!({ "input": input, "id": ids.first() })
            };
            writeln!(out, "{}", record)?;
        } else {
            for id in &ids {
                writeln!(out, "{}", id)?;
            }
        }
    }

    out.flush()?;

    if missing > 0 {
        eprintln!("{} ({} of {} inputs)", Notice::NotFound, missing, inputs.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_locate(
    sources: &ContextSources,
    page: Option<&PageSnapshot>,
    limits: &ScanLimits,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let notice = Notice::from(locate(sources, page, limits));
    eprintln!("{}", notice);

    let Notice::Found(located) = notice else {
        return Ok(ExitCode::FAILURE);
    };

    if json {
        println!("{}", serde_json::to_string(&located)?);
    } else {
        println!("{}", located.id);
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_target(value: &str) -> Result<TargetPath, String> {
    if value.is_empty() {
        return Ok(TargetPath(Vec::new()));
    }

    value
        .split('.')
        .map(|part| {
            part.parse::<usize>()
                .map_err(|e| format!("invalid child index {:?}: {}", part, e))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(TargetPath)
}
