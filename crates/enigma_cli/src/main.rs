// crates/enigma_cli/src/main.rs
//
// Exit codes, typed error mapping, logging setup, the search run, and output
// rendering (text always; JSON behind `report-json`).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad input: missing message, unknown name, pool too small, non A–Z text.
    pub const VALIDATION: i32 = 2;
    /// The search itself failed (a worker panicked).
    pub const SEARCH: i32 = 3;
    /// Writing results failed.
    pub const IO: i32 = 4;
}

use std::io::{self, Write};
use std::process::ExitCode;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Config, Format};
use enigma_search::{run_search, SearchError, SearchOutcome};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug, Error)]
enum MainError {
    #[error("{0}")]
    Validation(String),
    #[error("search failed: {0}")]
    Search(String),
    #[error("output: {0}")]
    Io(String),
}

fn main() -> ExitCode {
    let cfg = match parse_cli() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("enigma-crack: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    init_logging(cfg.log_level);

    let rc = match run_once(&cfg) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("enigma-crack: error: {e}");
            map_error(&e)
        }
    };

    ExitCode::from(rc as u8)
}

/// stderr subscriber; `RUST_LOG` wins over the -v/-q default.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_once(cfg: &Config) -> Result<(), MainError> {
    let outcome = search(cfg)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cfg.format {
        Format::Text => write_text(&mut out, &outcome),
        Format::Json => write_json(&mut out, &outcome),
    }
    .and_then(|()| out.flush())
    .map_err(|e| MainError::Io(format!("write results: {e}")))
}

#[cfg(feature = "progress")]
fn search(cfg: &Config) -> Result<SearchOutcome, MainError> {
    use indicatif::{ProgressBar, ProgressStyle};

    if !cfg.progress {
        return run_search(&cfg.request).map_err(map_search_err);
    }

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{wide_bar} {pos}/{len} keys ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let outcome = enigma_search::run_search_with_progress(&cfg.request, |p| {
        bar.set_length(p.key_space);
        bar.set_position(p.evaluated);
    });
    bar.finish_and_clear();
    outcome.map_err(map_search_err)
}

#[cfg(not(feature = "progress"))]
fn search(cfg: &Config) -> Result<SearchOutcome, MainError> {
    if cfg.progress {
        tracing::warn!("built without the `progress` feature; ignoring --progress");
    }
    run_search(&cfg.request).map_err(map_search_err)
}

fn write_text(out: &mut impl Write, outcome: &SearchOutcome) -> io::Result<()> {
    for candidate in &outcome.results {
        writeln!(out, "{candidate}")?;
    }
    if outcome.timed_out {
        writeln!(
            out,
            "TIMED OUT after {} of {} keys",
            outcome.evaluated, outcome.key_space
        )?;
    }
    Ok(())
}

#[cfg(feature = "report-json")]
fn write_json(out: &mut impl Write, outcome: &SearchOutcome) -> io::Result<()> {
    use enigma_search::KeySettings;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Report<'a> {
        evaluated: u64,
        key_space: u64,
        timed_out: bool,
        results: Vec<Ranked<'a>>,
    }

    #[derive(Serialize)]
    struct Ranked<'a> {
        rank: usize,
        score: f64,
        plaintext: &'a str,
        settings: &'a KeySettings,
    }

    let report = Report {
        evaluated: outcome.evaluated,
        key_space: outcome.key_space,
        timed_out: outcome.timed_out,
        results: outcome
            .results
            .iter()
            .enumerate()
            .map(|(i, c)| Ranked {
                rank: i + 1,
                score: c.score,
                plaintext: &c.plaintext,
                settings: &c.settings,
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

#[cfg(not(feature = "report-json"))]
fn write_json(_out: &mut impl Write, _outcome: &SearchOutcome) -> io::Result<()> {
    // Rejected during argument validation.
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "json output not enabled (build with feature `report-json`)",
    ))
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Search(_) => SEARCH,
        MainError::Io(_) => IO,
    }
}

fn map_search_err(e: SearchError) -> MainError {
    match e {
        SearchError::WorkerPanicked => MainError::Search(e.to_string()),
        other => MainError::Validation(other.to_string()),
    }
}
