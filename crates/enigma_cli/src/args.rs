// crates/enigma_cli/src/args.rs
//
// CLI argument surface and its validation into a ready-to-run search.
//
// Rules:
// - --message is required and must be A–Z only (checked here, not by clap, so a
//   missing message maps to the validation exit code like every other input error)
// - --rotors / --reflectors are comma-separated names; whitespace is trimmed and
//   duplicates collapse before the pool-size checks (≥3 rotors, ≥1 reflector)
// - --results and --num-threads must be ≥1
// - --format json needs the `report-json` feature

use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use thiserror::Error;

use enigma_core::{parse_reflector_list, parse_rotor_list, CoreError};
use enigma_search::{ScoringMode, SearchError, SearchRequest, DEFAULT_RESULTS};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "enigma-crack",
    version,
    disable_help_subcommand = true,
    about = "Brute-force a three-rotor Enigma ciphertext by English letter frequency"
)]
pub struct Args {
    /// Ciphertext to crack (A–Z only).
    #[arg(long)]
    pub message: Option<String>,

    /// Plaintext fragment expected in the message; matches get a score bonus.
    #[arg(long)]
    pub crib: Option<String>,

    /// Rotors to try, comma-separated (1–6). At least three distinct names.
    #[arg(long, default_value = "1,2,3,4,5")]
    pub rotors: String,

    /// Reflectors to try, comma-separated (A–C).
    #[arg(long, default_value = "A,B,C")]
    pub reflectors: String,

    /// Worker threads (default: available parallelism).
    #[arg(long = "num-threads", visible_alias = "num_threads")]
    pub num_threads: Option<usize>,

    /// Number of best candidates to print.
    #[arg(long, default_value_t = DEFAULT_RESULTS)]
    pub results: usize,

    /// Frequency statistics used for scoring.
    #[arg(long, value_enum, default_value_t = Scoring::Unigram)]
    pub scoring: Scoring,

    /// Stop after this many seconds and report the best found so far.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output format on stdout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Show a progress bar on stderr (needs the `progress` feature).
    #[arg(long)]
    pub progress: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Scoring {
    Unigram,
    Digram,
}

impl From<Scoring> for ScoringMode {
    fn from(s: Scoring) -> Self {
        match s {
            Scoring::Unigram => ScoringMode::Unigram,
            Scoring::Digram => ScoringMode::Digram,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Validated run configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub request: SearchRequest,
    pub format: Format,
    /// Default log filter when RUST_LOG is unset.
    pub log_level: &'static str,
    pub progress: bool,
}

/// Errors surfaced by argument validation.
/// Messages stay short and stable for scripts and tests.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Name(#[from] CoreError),

    #[error(transparent)]
    Request(#[from] SearchError),

    #[error("--format json is not available (build with feature `report-json`)")]
    JsonUnavailable,
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Config, CliError> {
    validate(Args::parse())
}

/// Turn raw arguments into a checked search request.
pub fn validate(args: Args) -> Result<Config, CliError> {
    let rotors = parse_rotor_list(&args.rotors)?;
    let reflectors = parse_reflector_list(&args.reflectors)?;

    let mut request = SearchRequest::new(args.message.unwrap_or_default())
        .rotors(rotors)
        .reflectors(reflectors)
        .results(args.results)
        .scoring(args.scoring.into());
    if let Some(crib) = args.crib {
        request = request.crib(crib);
    }
    if let Some(n) = args.num_threads {
        request = request.workers(n);
    }
    if let Some(secs) = args.timeout_secs {
        request = request.timeout(Duration::from_secs(secs));
    }

    // Fail at startup rather than after spinning up workers.
    request.validate()?;

    if args.format == Format::Json && !cfg!(feature = "report-json") {
        return Err(CliError::JsonUnavailable);
    }

    Ok(Config {
        request,
        format: args.format,
        log_level: log_level(args.verbose, args.quiet),
        progress: args.progress,
    })
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}
