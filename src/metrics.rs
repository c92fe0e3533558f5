/**
This module computes the attachment scores (UAS and LAS) of a dataset holding both the gold and the
predicted dependency trees.
*/
use crate::config::{EvalConfig, EvalConfigBuilder, Metric, PunctuationFilter, TagColumn};
use crate::conll::{parse_dataset, MalformedLineError, TokenRecord};
use crate::datastructure::{Dataset, Sentence};
use crate::diagnostics::Diagnostics;
use crate::reporter::Reporter;
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{self, Display},
};

/// What happened to a single token during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOutcome {
    /// Punctuation. The token is not scored.
    Excluded,
    /// Correct head and correct label.
    Correct,
    /// Correct head but wrong label.
    WrongLabel,
    /// Wrong head. The label is not checked.
    WrongHead,
}

impl TokenOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::WrongLabel | Self::WrongHead)
    }
}

/// Scores a single token.
pub fn score_token(
    token: &TokenRecord,
    punctuation: &PunctuationFilter,
    punctuation_column: TagColumn,
) -> TokenOutcome {
    if punctuation.is_punctuation(token.tag(punctuation_column)) {
        TokenOutcome::Excluded
    } else if !token.head_is_correct() {
        TokenOutcome::WrongHead
    } else if !token.label_is_correct() {
        TokenOutcome::WrongLabel
    } else {
        TokenOutcome::Correct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Counts of a single sentence. `labeled_correct <= unlabeled_correct <= tokens` always holds.
pub struct SentenceScore {
    /// Position of the sentence in the dataset
    pub index: usize,
    /// Number of lines of the sentence, punctuation included
    pub raw_len: usize,
    /// Number of scored tokens
    pub tokens: usize,
    /// Number of scored tokens with a correct head
    pub unlabeled_correct: usize,
    /// Number of scored tokens with a correct head and a correct label
    pub labeled_correct: usize,
}

impl SentenceScore {
    /// Number of scored tokens counted as errors for the given metric.
    pub fn errors(&self, metric: Metric) -> usize {
        match metric {
            Metric::Uas => self.tokens - self.unlabeled_correct,
            Metric::Las => self.tokens - self.labeled_correct,
        }
    }
}

/// Scores every token of `sentence`. Returns the counts of the sentence and its erroneous
/// tokens, in order.
pub fn score_sentence<'d, 'a>(
    sentence: Sentence<'d, 'a>,
    punctuation: &PunctuationFilter,
    punctuation_column: TagColumn,
) -> (SentenceScore, Vec<&'d TokenRecord<'a>>) {
    let mut score = SentenceScore {
        index: sentence.index(),
        raw_len: sentence.raw_len(),
        tokens: 0,
        unlabeled_correct: 0,
        labeled_correct: 0,
    };
    let mut errors = Vec::new();
    for token in sentence.tokens() {
        let outcome = score_token(token, punctuation, punctuation_column);
        match outcome {
            TokenOutcome::Excluded => continue,
            TokenOutcome::Correct => {
                score.unlabeled_correct += 1;
                score.labeled_correct += 1;
            }
            TokenOutcome::WrongLabel => score.unlabeled_correct += 1,
            TokenOutcome::WrongHead => {}
        }
        if outcome.is_error() {
            errors.push(token);
        }
        score.tokens += 1;
    }
    (score, errors)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Dataset-wide counts.
pub struct Totals {
    pub tokens: usize,
    pub unlabeled_correct: usize,
    pub labeled_correct: usize,
}

impl Totals {
    fn add(self, score: &SentenceScore) -> Self {
        Self {
            tokens: self.tokens + score.tokens,
            unlabeled_correct: self.unlabeled_correct + score.unlabeled_correct,
            labeled_correct: self.labeled_correct + score.labeled_correct,
        }
    }

    /// Attachment score for `metric`. Fails if no token was scored.
    pub fn score(&self, metric: Metric) -> Result<f64, ComputationError> {
        let numerator = match metric {
            Metric::Uas => self.unlabeled_correct,
            Metric::Las => self.labeled_correct,
        };
        ratio(numerator, self.tokens)
    }
}

fn ratio(numerator: usize, denominator: usize) -> Result<f64, ComputationError> {
    if denominator == 0 {
        return Err(ComputationError::EmptyDataset);
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Result of a single pass over a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate<'d, 'a> {
    /// One score per sentence, in the order of the dataset
    pub scores: Vec<SentenceScore>,
    /// Every erroneous token, in the order of the dataset
    pub error_tokens: Vec<&'d TokenRecord<'a>>,
    pub totals: Totals,
}

/// Scores every sentence of the dataset and sums the counts.
pub fn aggregate<'d, 'a>(
    dataset: &'d Dataset<'a>,
    punctuation: &PunctuationFilter,
    punctuation_column: TagColumn,
) -> Aggregate<'d, 'a> {
    let mut scores = Vec::with_capacity(dataset.len());
    let mut error_tokens = Vec::new();
    let mut totals = Totals::default();
    for sentence in dataset {
        let (score, errors) = score_sentence(sentence, punctuation, punctuation_column);
        totals = totals.add(&score);
        scores.push(score);
        error_tokens.extend(errors);
    }
    Aggregate {
        scores,
        error_tokens,
        totals,
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Enum error encompassing the failures that could happen when computing the attachment scores.
pub enum ComputationError {
    /// A line of the input could not be parsed into a token.
    MalformedLine(MalformedLineError),
    /// No token was scored: the input is empty or only contains punctuation.
    EmptyDataset,
}

impl Display for ComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine(line_err) => Display::fmt(line_err, f),
            Self::EmptyDataset => write!(
                f,
                "Encountered division by zero: no token left to score after removing punctuation"
            ),
        }
    }
}

impl Error for ComputationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedLine(line_err) => Some(line_err),
            Self::EmptyDataset => None,
        }
    }
}

impl From<MalformedLineError> for ComputationError {
    fn from(value: MalformedLineError) -> Self {
        Self::MalformedLine(value)
    }
}

/// Computes the attachment scores of an already parsed dataset and, if asked by the config, the
/// diagnostics.
pub fn evaluate_dataset(
    dataset: &Dataset,
    config: &EvalConfig,
) -> Result<Reporter, ComputationError> {
    log::debug!("Evaluating {} sentences with:\n {}", dataset.len(), config);
    let aggregate = aggregate(dataset, config.punctuation(), config.punctuation_column());
    let totals = aggregate.totals;
    let uas = totals.score(Metric::Uas)?;
    let las = totals.score(Metric::Las)?;
    log::info!(
        "Scored {} of {} tokens: UAS {:.4}, LAS {:.4}",
        totals.tokens,
        dataset.token_count(),
        uas,
        las
    );
    let diagnostics = config
        .detailed()
        .then(|| Diagnostics::new(&aggregate, dataset, config));
    Ok(Reporter {
        metric: config.metric(),
        uas,
        las,
        totals,
        sentences: dataset.len(),
        diagnostics,
    })
}

/// Parses `content` and computes its attachment scores. The `labeled` flag selects LAS instead
/// of UAS as the main score and `detailed` adds the diagnostics to the report.
///
/// # Example
/// ```rust
/// use depeval::{attachment_report, PunctuationFilter};
///
/// let content = "\
/// 1\tThe\tthe\tDT\tDT\tDT\t2\tNMOD\t2\tNMOD
/// 2\tcat\tcat\tNN\tNN\tNN\t3\tSBJ\t3\tOBJ
/// 3\tsleeps\tsleep\tVBZ\tVBZ\tVBZ\t0\tROOT\t0\tROOT
/// 4\t.\t.\t.\t.\t.\t3\tP\t1\tP
/// ";
/// let uas = attachment_report(content, false, false, PunctuationFilter::English).unwrap();
/// assert_eq!(uas.to_string(), "1.0000\n");
/// let las = attachment_report(content, true, false, PunctuationFilter::English).unwrap();
/// assert_eq!(las.to_string(), "0.6667\n");
/// ```
pub fn attachment_report(
    content: &str,
    labeled: bool,
    detailed: bool,
    punctuation: PunctuationFilter,
) -> Result<Reporter, ComputationError> {
    let config = EvalConfigBuilder::default()
        .labeled(labeled)
        .detailed(detailed)
        .punctuation(punctuation)
        .build();
    let dataset = parse_dataset(content)?;
    evaluate_dataset(&dataset, &config)
}
