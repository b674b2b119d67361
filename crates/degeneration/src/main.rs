use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use common::configuration::Configuration;
use common::consts::CONFIG_PATH_ENV;
use common::conversation::{ConversationDocument, Turn};
use common::errors::ConfigError;
use degeneration::report::{analyze_and_report, render_text, ReportOptions};
use degeneration::samples::{find_sample, sample_conversations};
use degeneration::signals::{AnalysisOutcome, RefusalCatalog, TokenBasedDegenerationAnalyzer};
use degeneration::tokenizer::{AdaptiveTokenizer, TokenizerBackendKind};
use degeneration::utils::tracing::init_logging;

const DEFAULT_SAMPLE: &str = "degenerate";

#[derive(Parser)]
#[command(name = "degeneration")]
#[command(version)]
#[command(about = "Measure degeneration (looping, low diversity, refusal templates) in assistant replies")]
struct Cli {
    /// YAML configuration file (overrides DEGENERATION_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score every assistant turn of a conversation
    Analyze(AnalyzeArgs),
    /// List the built-in sample conversations
    Samples,
    /// Print the active refusal catalog
    Catalog,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Conversation JSON file, or `-` for stdin
    #[arg(long, conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Built-in sample to analyze (default: degenerate)
    #[arg(long)]
    sample: Option<String>,

    /// N-gram window width for the repetition signal
    #[arg(long)]
    ngram: Option<usize>,

    /// Tokenizer backend: segmenter or fallback
    #[arg(long)]
    backend: Option<TokenizerBackendKind>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Error)]
enum InputError {
    #[error("failed to read conversation file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read conversation from stdin: {0}")]
    Stdin(#[source] std::io::Error),
    #[error("malformed conversation JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown sample `{0}`; run `degeneration samples` to list them")]
    UnknownSample(String),
}

/// An explicit `--config` must exist; the environment path falls back to defaults.
fn load_configuration(explicit: Option<&Path>) -> Result<Configuration, ConfigError> {
    match explicit {
        Some(path) => Configuration::load(path),
        None => match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Configuration::load_or_default(Path::new(&path)),
            Err(_) => Ok(Configuration::default()),
        },
    }
}

fn active_catalog(config: &Configuration) -> RefusalCatalog {
    match &config.refusal_phrases {
        Some(phrases) => RefusalCatalog::new(phrases),
        None => RefusalCatalog::default(),
    }
}

fn read_turns(args: &AnalyzeArgs) -> Result<Vec<Turn>, InputError> {
    let raw = match &args.input {
        Some(path) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(InputError::Stdin)?;
            buffer
        }
        Some(path) => std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.clone(),
            source,
        })?,
        None => {
            let key = args.sample.as_deref().unwrap_or(DEFAULT_SAMPLE);
            let sample =
                find_sample(key).ok_or_else(|| InputError::UnknownSample(key.to_string()))?;
            debug!(sample = sample.key, "using built-in sample");
            return Ok(sample.turns);
        }
    };

    let document: ConversationDocument = serde_json::from_str(&raw)?;
    Ok(document.into_turns())
}

fn run_analyze(
    config: &Configuration,
    args: &AnalyzeArgs,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let turns = read_turns(args)?;

    let backend = args.backend.unwrap_or_else(|| config.tokenizer_backend());
    let tokenizer = AdaptiveTokenizer::new(backend);
    if let Err(e) = tokenizer.warm_up() {
        debug!(error = %e, "continuing with fallback tokenizer");
    }

    let analyzer = TokenBasedDegenerationAnalyzer::new(Arc::new(tokenizer))
        .with_ngram_size(args.ngram.unwrap_or_else(|| config.ngram_size()))
        .with_catalog(active_catalog(config));
    let options = ReportOptions {
        distribution_top_k: config.distribution_top_k(),
        overlap_top_k: config.overlap_top_k(),
    };

    let outcome = analyze_and_report(&analyzer, &turns, options);
    let succeeded = outcome.is_ok();

    match args.format {
        OutputFormat::Text => match &outcome {
            Ok(report) => print!("{}", render_text(report)),
            Err(e) => eprintln!("error: {}", e),
        },
        OutputFormat::Json => {
            let tagged = AnalysisOutcome::from(outcome);
            println!("{}", serde_json::to_string_pretty(&tagged)?);
        }
        OutputFormat::Yaml => {
            let tagged = AnalysisOutcome::from(outcome);
            print!("{}", serde_yaml::to_string(&tagged)?);
        }
    }

    Ok(succeeded)
}

fn run_samples() {
    for sample in sample_conversations() {
        let assistant_turns = sample.turns.iter().filter(|t| t.is_assistant()).count();
        println!(
            "{:<12} {} ({} turns, {} assistant)",
            sample.key,
            sample.name,
            sample.turns.len(),
            assistant_turns
        );
    }
}

fn run_catalog(config: &Configuration) {
    for phrase in active_catalog(config).phrases() {
        println!("{}", phrase);
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error + Send + Sync>> {
    let config = load_configuration(cli.config.as_deref())?;
    init_logging(config.log_level());
    info!(
        version = config.version.as_deref().unwrap_or("default"),
        "loaded configuration"
    );

    match &cli.command {
        Command::Analyze(args) => {
            if !run_analyze(&config, args)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Samples => run_samples(),
        Command::Catalog => run_catalog(&config),
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
