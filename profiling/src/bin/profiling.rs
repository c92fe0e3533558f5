use clap::Parser;
use depeval::{attachment_report_conf, EvalConfigBuilder, PunctuationFilter};
use std::fs::read_to_string;
use std::ops::Range;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
struct Args {
    #[arg(short, long, default_value_t = 1)]
    n_samples: u32,
    #[arg(short, long, default_value = "./data/datasets/big_dataset.conll")]
    dataset: PathBuf,
    #[arg(short, long, default_value = "english")]
    punctuation: PunctuationFilter,
    #[arg(long)]
    detailed: bool,
}

fn main() {
    let args = Args::parse();
    let n_samples = args.n_samples;
    let iter = Range {
        start: 0,
        end: n_samples,
    };
    let content = read_to_string(&args.dataset).unwrap();
    let config = EvalConfigBuilder::default()
        .punctuation(args.punctuation.clone())
        .detailed(args.detailed)
        .build();
    let mut total_duration = Duration::ZERO;
    for _ in iter {
        let now = Instant::now();
        {
            attachment_report_conf(&content, &config).unwrap();
        }
        let elapsed = now.elapsed();
        total_duration += elapsed;
    }
    println!(
        "Total duration: {} with {n_samples} samples",
        total_duration.as_secs_f64()
    )
}
