/**
This modules prettyprints the result of an evaluation: the attachment score and, optionally, the
diagnostics.
*/
use crate::config::Metric;
use crate::diagnostics::Diagnostics;
use crate::metrics::Totals;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The reporter holds the result of an evaluation. It can be displayed as text, in the format of
/// the classic evaluation scripts, or serialized. The reporter can be built with the
/// `attachment_report` or the `attachment_report_conf` function.
///
/// # Example
///
/// ```rust
/// use depeval::{attachment_report_conf, EvalConfigBuilder, Metric};
///
/// let content = "\
/// 1\tDogs\tdog\tNNS\tNNS\tNNS\t2\tSBJ\t2\tSBJ
/// 2\tbark\tbark\tVBP\tVBP\tVBP\t0\tROOT\t1\tROOT
/// ";
/// let config = EvalConfigBuilder::default().detailed(true).build();
/// let reporter = attachment_report_conf(content, &config).unwrap();
/// let expected_report = "0.5000
/// Sentence length factors:
/// 2\t1
/// Token postag factors:
/// VBP\t1
/// Top 10 incorrect sentences:
/// sid=0, #tokens=2, #wrong=1
/// 1\tDogs\tdog\tNNS\tNNS\tNNS\t2\tSBJ\t2\tSBJ
/// 2\tbark\tbark\tVBP\tVBP\tVBP\t0\tROOT\t1\tROOT
///
/// ";
/// assert_eq!(expected_report, reporter.to_string());
/// assert_eq!(reporter.metric(), Metric::Uas);
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reporter {
    pub(crate) metric: Metric,
    pub(crate) uas: f64,
    pub(crate) las: f64,
    pub(crate) totals: Totals,
    /// Number of sentences in the dataset
    pub(crate) sentences: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) diagnostics: Option<Diagnostics>,
}

impl Reporter {
    pub fn metric(&self) -> Metric {
        self.metric
    }
    /// The main score, selected by the metric.
    pub fn score(&self) -> f64 {
        match self.metric {
            Metric::Uas => self.uas,
            Metric::Las => self.las,
        }
    }
    pub fn uas(&self) -> f64 {
        self.uas
    }
    pub fn las(&self) -> f64 {
        self.las
    }
    pub fn totals(&self) -> Totals {
        self.totals
    }
    pub fn sentences(&self) -> usize {
        self.sentences
    }
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.diagnostics.as_ref()
    }
}

/// The score is always written with 4 decimals.
impl Display for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:.4}", self.score())?;
        if let Some(diagnostics) = &self.diagnostics {
            write!(f, "{}", diagnostics)?
        }
        Ok(())
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sentence length factors:")?;
        for factor in self.length_factors.iter() {
            writeln!(f, "{}\t{}", factor.length, factor.errors)?
        }
        writeln!(f, "Token postag factors:")?;
        for factor in self.postag_factors.iter() {
            writeln!(f, "{}\t{}", factor.tag, factor.count)?
        }
        writeln!(f, "Top {} incorrect sentences:", self.top_n)?;
        for sentence in self.worst_sentences.iter() {
            writeln!(
                f,
                "sid={}, #tokens={}, #wrong={}",
                sentence.index, sentence.tokens, sentence.errors
            )?;
            writeln!(f, "{}\n", sentence.text)?
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diagnostics::{LengthFactor, PostagFactor, WorstSentence};
    use rstest::rstest;

    fn reporter(metric: Metric, uas: f64, las: f64) -> Reporter {
        Reporter {
            metric,
            uas,
            las,
            totals: Totals::default(),
            sentences: 1,
            diagnostics: None,
        }
    }

    #[rstest]
    #[case(Metric::Uas, "0.9234\n")]
    #[case(Metric::Las, "0.8000\n")]
    fn test_display_four_decimals(#[case] metric: Metric, #[case] expected: &str) {
        let reporter = reporter(metric, 0.923_42, 0.8);
        assert_eq!(reporter.to_string(), expected)
    }

    #[rstest]
    #[case(1.0, "1.0000\n")]
    #[case(0.0, "0.0000\n")]
    #[case(2.0 / 3.0, "0.6667\n")]
    fn test_display_rounding(#[case] uas: f64, #[case] expected: &str) {
        assert_eq!(reporter(Metric::Uas, uas, 0.0).to_string(), expected)
    }

    #[test]
    fn test_display_diagnostics_sections_in_order() {
        let mut reporter = reporter(Metric::Las, 1.0, 0.5);
        reporter.diagnostics = Some(Diagnostics {
            length_factors: vec![
                LengthFactor {
                    length: 3,
                    errors: 1,
                },
                LengthFactor {
                    length: 1,
                    errors: 0,
                },
            ],
            postag_factors: vec![PostagFactor {
                tag: String::from("NN"),
                count: 1,
            }],
            top_n: 10,
            worst_sentences: vec![WorstSentence {
                index: 4,
                tokens: 2,
                errors: 1,
                text: String::from("line one\nline two"),
            }],
        });
        let expected = "0.5000
Sentence length factors:
3\t1
1\t0
Token postag factors:
NN\t1
Top 10 incorrect sentences:
sid=4, #tokens=2, #wrong=1
line one
line two

";
        assert_eq!(reporter.to_string(), expected)
    }

    #[test]
    fn test_serialize_skips_missing_diagnostics() {
        let json = serde_json::to_value(reporter(Metric::Las, 1.0, 0.5)).unwrap();
        assert_eq!(json["metric"], "LAS");
        assert_eq!(json["las"], 0.5);
        assert!(json.get("diagnostics").is_none());
    }
}
