/*!
This library computes the attachment scores of a dependency parser from a CoNLL file holding both
the gold and the predicted trees. It is a re-implementation of the classic `eval.py` scripts used
to evaluate transition-based parsers, unified behind a single configuration.

# METRICS
* UAS (unlabeled attachment score): fraction of the scored tokens whose predicted head is the gold
    head.
* LAS (labeled attachment score): fraction of the scored tokens whose predicted head *and*
    predicted label are the gold ones.

Punctuation tokens are not scored. Which tags count as punctuation depends on the treebank:
* English (Penn Treebank): `.`, `,`, `:`, `''` and ` `` `.
* Chinese (Penn Chinese Treebank): `PU`.
* Any custom set of tags.

# INPUT
One token per line, sentences separated by blank lines. Each line holds at least ten
whitespace-separated columns: index, word, lemma, coarse part-of-speech, fine part-of-speech,
features, gold head, gold label, predicted head and predicted label. The punctuation filter reads
column 5 by default.

# DIAGNOSTICS
When asked for, the report also contains:
* the errors summed by sentence length (number of lines, punctuation included);
* the erroneous tokens counted by part-of-speech (column 3 by default);
* the sentences with the most errors (10 by default).

The error count of a sentence depends on the metric: wrong heads for UAS, wrong heads or labels for
LAS.
*/

mod config;
mod conll;
mod datastructure;
mod diagnostics;
mod metrics;
mod reporter;

// The public api starts here
pub use conll::{parse_dataset, MalformedLineError, TokenRecord, REQUIRED_COLUMNS};

pub use datastructure::{Dataset, Sentence, SentenceIter};

pub use metrics::{
    aggregate, attachment_report, evaluate_dataset, score_sentence, score_token, Aggregate,
    ComputationError, SentenceScore, TokenOutcome, Totals,
};

pub use diagnostics::{
    postag_factors, sentence_length_factors, worst_sentences, Diagnostics, LengthFactor,
    PostagFactor, WorstSentence,
};

pub use reporter::Reporter;

pub use config::{
    ConfigParsingError, EvalConfig, EvalConfigBuilder, Metric, PunctuationFilter, TagColumn,
    CHINESE_PUNCTUATION_TAG, DEFAULT_TOP_N, ENGLISH_PUNCTUATION_TAGS,
};

/// Main entrypoint of the library. This function parses `content` and computes its attachment
/// scores and, if the config asks for it, the diagnostics. Instead of taking in the raw
/// parameters, this function takes an `EvalConfig` struct and uses sensible defaults.
///
/// * `content`: Content of a CoNLL file
/// * `config`: Parameters of the evaluation
///
/// #Example
/// ```rust
/// use depeval::{attachment_report_conf, EvalConfigBuilder, PunctuationFilter};
///
/// let content = "\
/// 1\t上海\t上海\tNR\tNR\tNR\t2\tNMOD\t2\tNMOD
/// 2\t浦东\t浦东\tNR\tNR\tNR\t0\tROOT\t0\tROOT
/// 3\t。\t。\tPU\tPU\tPU\t2\tP\t1\tDEP
/// ";
/// let config = EvalConfigBuilder::default()
///     .punctuation(PunctuationFilter::Chinese)
///     .labeled(true)
///     .build();
/// let reporter = attachment_report_conf(content, &config).unwrap();
/// assert_eq!("1.0000\n", reporter.to_string());
/// ```
pub fn attachment_report_conf(
    content: &str,
    config: &EvalConfig,
) -> Result<Reporter, ComputationError> {
    let dataset = parse_dataset(content)?;
    evaluate_dataset(&dataset, config)
}
