use criterion::{criterion_group, criterion_main, Criterion};
use depeval::{attachment_report_conf, parse_dataset, EvalConfigBuilder, PunctuationFilter};
use pprof::criterion::{Output, PProfProfiler};

const TAGS: [&str; 8] = ["NN", "VB", "DT", "JJ", "IN", ",", ".", "PRP"];
const LABELS: [&str; 4] = ["SBJ", "OBJ", "NMOD", "P"];

/// Builds a deterministic dataset of `n_sentences` sentences of varying length, with roughly one
/// wrong head out of seven tokens and one wrong label out of eleven.
fn build_content(n_sentences: usize) -> String {
    let mut content = String::new();
    for s in 0..n_sentences {
        let len = 5 + s % 30;
        for i in 1..=len {
            let k = s * 31 + i;
            let tag = TAGS[k % TAGS.len()];
            let gold_head = (k * 7) % (len + 1);
            let gold_label = LABELS[k % LABELS.len()];
            let pred_head = if k % 7 == 0 { (gold_head + 1) % (len + 1) } else { gold_head };
            let pred_label = if k % 11 == 0 { "DEP" } else { gold_label };
            content.push_str(&format!(
                "{i}\tw{k}\tw{k}\t{tag}\t{tag}\t{tag}\t{gold_head}\t{gold_label}\t{pred_head}\t{pred_label}\n"
            ));
        }
        content.push('\n');
    }
    content
}

fn benchmark_parse_dataset(c: &mut Criterion) {
    let content = build_content(40_000);
    c.bench_function("full_dataset_parse", |b| {
        b.iter(|| parse_dataset(&content).unwrap())
    });
}

fn benchmark_full_english_dataset(c: &mut Criterion) {
    let content = build_content(40_000);
    let config = EvalConfigBuilder::default().labeled(true).build();
    c.bench_function("full_dataset_english_report", |b| {
        b.iter(|| attachment_report_conf(&content, &config).unwrap())
    });
}

fn benchmark_full_detailed_dataset(c: &mut Criterion) {
    let content = build_content(40_000);
    let config = EvalConfigBuilder::default()
        .punctuation(PunctuationFilter::Chinese)
        .detailed(true)
        .build();
    c.bench_function("full_dataset_detailed_report", |b| {
        b.iter(|| attachment_report_conf(&content, &config).unwrap())
    });
}

criterion_group!(
    name=long_report_benches;
    config = Criterion::default().sample_size(100).with_profiler(PProfProfiler::new(3000, Output::Flamegraph(None)));
    targets =
    benchmark_parse_dataset,
    benchmark_full_english_dataset,
    benchmark_full_detailed_dataset,
);
criterion_main!(long_report_benches);
