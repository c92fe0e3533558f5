//! Command-line interface of depeval

use anyhow::{Context, Result};
use clap::Parser;
use depeval::{evaluate_dataset, parse_dataset, EvalConfigBuilder, PunctuationFilter, TagColumn};
use std::fs;
use std::path::PathBuf;

/// Evaluate dependency parsing performance (UAS/LAS) from a CoNLL file holding the gold and the
/// predicted heads and labels.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The path to the file
    filename: PathBuf,

    /// Evaluate LAS instead of UAS
    #[arg(short, long)]
    labeled: bool,

    /// Log details: errors by sentence length, by postag and the worst sentences
    #[arg(short, long)]
    detailed: bool,

    /// Punctuation convention: english (. , : '' ``), chinese (PU) or none
    #[arg(short, long, default_value = "english")]
    punctuation: PunctuationFilter,

    /// Comma-separated custom punctuation tags, overrides --punctuation
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    punct_tags: Vec<String>,

    /// Column tested by the punctuation filter (coarse-pos, fine-pos, features or 3, 4, 5)
    #[arg(long, default_value = "features")]
    punct_column: TagColumn,

    /// Column used to group the erroneous tokens (coarse-pos, fine-pos, features or 3, 4, 5)
    #[arg(long, default_value = "coarse-pos")]
    pos_column: TagColumn,

    /// Number of incorrect sentences listed with --detailed
    #[arg(short = 'n', long = "top", default_value_t = depeval::DEFAULT_TOP_N)]
    top_n: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// The score on the first line, followed by the diagnostics
    Text,
    /// The whole report as a JSON object
    Json,
}

impl Args {
    fn execute(&self) -> Result<()> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);

        let punctuation = if self.punct_tags.is_empty() {
            self.punctuation.clone()
        } else {
            PunctuationFilter::custom(self.punct_tags.iter().cloned())
        };
        let config = EvalConfigBuilder::default()
            .labeled(self.labeled)
            .detailed(self.detailed)
            .punctuation(punctuation)
            .punctuation_column(self.punct_column)
            .pos_column(self.pos_column)
            .top_n(self.top_n)
            .build();

        let content = fs::read_to_string(&self.filename)
            .with_context(|| format!("Failed to read file: {}", self.filename.display()))?;
        let dataset = parse_dataset(&content)
            .with_context(|| format!("Failed to parse {}", self.filename.display()))?;
        log::info!(
            "Read {} sentences ({} tokens) from {}",
            dataset.len(),
            dataset.token_count(),
            self.filename.display()
        );
        let reporter = evaluate_dataset(&dataset, &config)
            .with_context(|| format!("Failed to evaluate {}", self.filename.display()))?;

        match self.format {
            OutputFormat::Text => print!("{}", reporter),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reporter)?),
        }
        Ok(())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }
}

fn main() -> Result<()> {
    Args::parse().execute()
}
