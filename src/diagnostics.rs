/**
Error breakdowns of an evaluation: errors by sentence length, errors by part-of-speech and the
sentences with the most errors.
*/
use crate::config::{EvalConfig, Metric, TagColumn};
use crate::conll::TokenRecord;
use crate::datastructure::Dataset;
use crate::metrics::{Aggregate, SentenceScore};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthFactor {
    /// Number of lines of the sentences, punctuation included
    pub length: usize,
    /// Sum of the errors of the sentences of this length
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostagFactor {
    pub tag: String,
    /// Number of erroneous tokens with this tag
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorstSentence {
    pub index: usize,
    /// Number of scored tokens
    pub tokens: usize,
    pub errors: usize,
    /// The sentence block, as found in the input
    pub text: String,
}

/// The three error breakdowns, in the order they are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub length_factors: Vec<LengthFactor>,
    pub postag_factors: Vec<PostagFactor>,
    /// Number of worst sentences asked for. `worst_sentences` is shorter when the dataset does not
    /// have enough sentences.
    pub top_n: usize,
    pub worst_sentences: Vec<WorstSentence>,
}

impl Diagnostics {
    pub(crate) fn new(aggregate: &Aggregate, dataset: &Dataset, config: &EvalConfig) -> Self {
        let metric = config.metric();
        Self {
            length_factors: sentence_length_factors(&aggregate.scores, metric),
            postag_factors: postag_factors(&aggregate.error_tokens, config.pos_column()),
            top_n: config.top_n(),
            worst_sentences: worst_sentences(&aggregate.scores, dataset, metric, config.top_n()),
        }
    }
}

/// Sums the errors of the sentences by raw sentence length. Every length found in the dataset is
/// reported, from the longest to the shortest.
pub fn sentence_length_factors(scores: &[SentenceScore], metric: Metric) -> Vec<LengthFactor> {
    let mut factors: BTreeMap<usize, usize> = BTreeMap::new();
    for score in scores {
        *factors.entry(score.raw_len).or_insert(0) += score.errors(metric);
    }
    factors
        .into_iter()
        .rev()
        .map(|(length, errors)| LengthFactor { length, errors })
        .collect()
}

/// Counts the erroneous tokens by the tag found in `column`, from the most frequent to the least
/// frequent. Ties keep the order in which the tags were first encountered.
pub fn postag_factors(errors: &[&TokenRecord], column: TagColumn) -> Vec<PostagFactor> {
    let mut positions: AHashMap<&str, usize> = AHashMap::default();
    let mut factors: Vec<PostagFactor> = Vec::new();
    for token in errors {
        let tag = token.tag(column);
        match positions.get(tag) {
            Some(&position) => factors[position].count += 1,
            None => {
                positions.insert(tag, factors.len());
                factors.push(PostagFactor {
                    tag: String::from(tag),
                    count: 1,
                });
            }
        }
    }
    // `sort_by_key` is stable
    factors.sort_by_key(|f| Reverse(f.count));
    factors
}

/// Returns the `n` sentences with the most errors, the first ones in the dataset first on ties.
/// Returns every sentence if the dataset has less than `n` sentences.
pub fn worst_sentences(
    scores: &[SentenceScore],
    dataset: &Dataset,
    metric: Metric,
    n: usize,
) -> Vec<WorstSentence> {
    if scores.len() < n {
        log::warn!(
            "Only {} sentences available, reporting all of them instead of the top {}",
            scores.len(),
            n
        );
    }
    scores
        .iter()
        .sorted_by_key(|s| Reverse(s.errors(metric)))
        .take(n)
        .map(|s| WorstSentence {
            index: s.index,
            tokens: s.tokens,
            errors: s.errors(metric),
            text: dataset
                .get(s.index)
                .map(|sentence| String::from(sentence.text()))
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{EvalConfigBuilder, PunctuationFilter};
    use crate::conll::parse_dataset;
    use crate::metrics::aggregate;
    use rstest::rstest;

    fn score(index: usize, raw_len: usize, tokens: usize, uas: usize, las: usize) -> SentenceScore {
        SentenceScore {
            index,
            raw_len,
            tokens,
            unlabeled_correct: uas,
            labeled_correct: las,
        }
    }

    #[rstest]
    #[case(Metric::Uas, vec![(5, 1), (3, 0), (2, 3)])]
    #[case(Metric::Las, vec![(5, 2), (3, 1), (2, 3)])]
    fn test_sentence_length_factors(#[case] metric: Metric, #[case] expected: Vec<(usize, usize)>) {
        let scores = vec![
            score(0, 2, 2, 1, 1),
            score(1, 5, 4, 3, 2),
            score(2, 3, 2, 2, 1),
            score(3, 2, 2, 0, 0),
        ];
        let actual: Vec<_> = sentence_length_factors(&scores, metric)
            .into_iter()
            .map(|f| (f.length, f.errors))
            .collect();
        assert_eq!(actual, expected)
    }

    #[test]
    fn test_length_factors_use_raw_length() {
        // The second line is punctuation: the sentence has 2 lines but only 1 scored token.
        let content = "1\tw\tw\tNN\tNN\tNN\t0\tR\t1\tR\n2\t.\t.\t.\t.\t.\t1\tP\t1\tP";
        let dataset = parse_dataset(content).unwrap();
        let aggregate = aggregate(&dataset, &PunctuationFilter::English, TagColumn::Features);
        let factors = sentence_length_factors(&aggregate.scores, Metric::Uas);
        assert_eq!(
            factors,
            vec![LengthFactor {
                length: 2,
                errors: 1
            }]
        );
    }

    #[test]
    fn test_postag_factors_stable_on_ties() {
        let content = "\
1\tw\tw\tVB\tVBZ\t_\t0\tR\t1\tR
2\tw\tw\tNN\tNNS\t_\t0\tR\t1\tR
3\tw\tw\tJJ\tJJ\t_\t0\tR\t1\tR
4\tw\tw\tNN\tNN\t_\t0\tR\t1\tR
5\tw\tw\tJJ\tJJ\t_\t0\tR\t1\tR";
        let dataset = parse_dataset(content).unwrap();
        let errors: Vec<_> = dataset.get(0).unwrap().tokens().iter().collect();
        let actual: Vec<_> = postag_factors(&errors, TagColumn::CoarsePos)
            .into_iter()
            .map(|f| (f.tag, f.count))
            .collect();
        let expected = vec![
            (String::from("NN"), 2),
            (String::from("JJ"), 2),
            (String::from("VB"), 1),
        ];
        assert_eq!(actual, expected);
        let fine = postag_factors(&errors, TagColumn::FinePos);
        assert_eq!(fine.len(), 4);
        assert_eq!(fine[0].tag, "JJ");
    }

    #[test]
    fn test_postag_factors_empty() {
        assert!(postag_factors(&[], TagColumn::CoarsePos).is_empty())
    }

    fn dataset_with_errors(errors_per_sentence: &[usize]) -> String {
        errors_per_sentence
            .iter()
            .map(|&n_errors| {
                (0..4)
                    .map(|i| {
                        let pred_head = if i < n_errors { "9" } else { "0" };
                        format!("{}\tw\tw\tNN\tNN\tNN\t0\tR\t{pred_head}\tR", i + 1)
                    })
                    .join("\n")
            })
            .join("\n\n")
    }

    #[test]
    fn test_worst_sentences_sorted_and_stable() {
        let content = dataset_with_errors(&[1, 3, 0, 3, 2]);
        let dataset = parse_dataset(&content).unwrap();
        let aggregate = aggregate(&dataset, &PunctuationFilter::English, TagColumn::Features);
        let worst = worst_sentences(&aggregate.scores, &dataset, Metric::Uas, 3);
        let actual: Vec<_> = worst.iter().map(|w| (w.index, w.errors)).collect();
        assert_eq!(actual, vec![(1, 3), (3, 3), (4, 2)]);
        assert_eq!(worst[0].tokens, 4);
        assert_eq!(worst[0].text, dataset.get(1).unwrap().text());
    }

    #[test]
    fn test_worst_sentences_not_enough_sentences() {
        let content = dataset_with_errors(&[1, 2]);
        let dataset = parse_dataset(&content).unwrap();
        let aggregate = aggregate(&dataset, &PunctuationFilter::English, TagColumn::Features);
        let worst = worst_sentences(&aggregate.scores, &dataset, Metric::Las, 10);
        let indices: Vec<_> = worst.iter().map(|w| w.index).collect();
        assert_eq!(indices, vec![1, 0]);
    }

    #[test]
    fn test_diagnostics_new_follows_config() {
        let content = dataset_with_errors(&[0, 1, 2, 3]);
        let dataset = parse_dataset(&content).unwrap();
        let config = EvalConfigBuilder::default()
            .detailed(true)
            .top_n(2)
            .build();
        let aggregate = aggregate(&dataset, config.punctuation(), config.punctuation_column());
        let diagnostics = Diagnostics::new(&aggregate, &dataset, &config);
        assert_eq!(
            diagnostics.length_factors,
            vec![LengthFactor {
                length: 4,
                errors: 6
            }]
        );
        assert_eq!(
            diagnostics.postag_factors,
            vec![PostagFactor {
                tag: String::from("NN"),
                count: 6
            }]
        );
        assert_eq!(diagnostics.top_n, 2);
        assert_eq!(diagnostics.worst_sentences.len(), 2);
        assert_eq!(diagnostics.worst_sentences[0].index, 3);
    }
}
