/*
 * This modules contains the knobs of an evaluation. Most importantly, it contains the `EvalConfig`
 * struct, which implements the default trait, and its builder. The config can be passed to the
 * `attachment_report_conf` function or the `evaluate_dataset` function.
*/
use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Punctuation tags of the Penn Treebank, excluded from the English evaluation.
pub const ENGLISH_PUNCTUATION_TAGS: [&str; 5] = [".", ",", ":", "''", "``"];
/// Punctuation tag of the Penn Chinese Treebank.
pub const CHINESE_PUNCTUATION_TAG: &str = "PU";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Which tokens are considered punctuation and excluded from the scores. The tag tested is read
/// from the column given by `EvalConfig::punctuation_column`.
pub enum PunctuationFilter {
    /// `.`, `,`, `:`, `''` and ` `` `
    #[default]
    English,
    /// `PU`
    Chinese,
    /// A user-supplied set of tags.
    Custom(BTreeSet<String>),
    /// Every token is scored.
    None,
}

impl PunctuationFilter {
    pub fn custom<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Custom(tags.into_iter().map(Into::into).collect())
    }

    pub fn is_punctuation(&self, tag: &str) -> bool {
        match self {
            Self::English => ENGLISH_PUNCTUATION_TAGS.contains(&tag),
            Self::Chinese => tag == CHINESE_PUNCTUATION_TAG,
            Self::Custom(tags) => tags.contains(tag),
            Self::None => false,
        }
    }
}

impl Display for PunctuationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::English => write!(f, "english"),
            Self::Chinese => write!(f, "chinese"),
            Self::Custom(tags) => write!(f, "custom {:?}", tags),
            Self::None => write!(f, "none"),
        }
    }
}

impl FromStr for PunctuationFilter {
    type Err = ConfigParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" | "ptb" => Ok(Self::English),
            "chinese" | "zh" | "ctb" => Ok(Self::Chinese),
            "none" => Ok(Self::None),
            _ => Err(ConfigParsingError::new::<Self>(s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
/// Column from which a tag is read.
pub enum TagColumn {
    /// Column 3
    CoarsePos,
    /// Column 4
    FinePos,
    /// Column 5
    Features,
}

impl TagColumn {
    pub fn position(&self) -> usize {
        match self {
            Self::CoarsePos => 3,
            Self::FinePos => 4,
            Self::Features => 5,
        }
    }
    fn name(&self) -> &'static str {
        match self {
            Self::CoarsePos => "coarse-pos",
            Self::FinePos => "fine-pos",
            Self::Features => "features",
        }
    }
}

impl Display for TagColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A column can be given by its name or its position.
impl FromStr for TagColumn {
    type Err = ConfigParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.to_lowercase();
        all::<TagColumn>()
            .find(|c| c.name() == lowercase || c.position().to_string() == lowercase)
            .ok_or_else(|| ConfigParsingError::new::<Self>(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Sequence, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// The attachment score reported.
pub enum Metric {
    /// Unlabeled attachment score: only the head must be correct.
    #[default]
    Uas,
    /// Labeled attachment score: the head and the label must be correct.
    Las,
}

impl Metric {
    pub fn from_labeled(labeled: bool) -> Self {
        if labeled {
            Self::Las
        } else {
            Self::Uas
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uas => write!(f, "UAS"),
            Self::Las => write!(f, "LAS"),
        }
    }
}

impl FromStr for Metric {
    type Err = ConfigParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all::<Metric>()
            .find(|m| m.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigParsingError::new::<Self>(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Could not parse a string into one of the configuration enums.
pub struct ConfigParsingError {
    value: String,
    target: &'static str,
}

impl ConfigParsingError {
    fn new<T>(value: &str) -> Self {
        let target = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or_default();
        Self {
            value: String::from(value),
            target,
        }
    }
}

impl Display for ConfigParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse the string ({}) into a `{}`",
            self.value, self.target
        )
    }
}

impl Error for ConfigParsingError {}

/// Number of sentences listed by the worst sentences report.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Clone, Debug, Eq, PartialEq)]
/// Config struct used to simplify the inputs of parameters to the main functions of `depeval`.
/// Implements the default trait.
pub struct EvalConfig {
    /// Which score is reported and used to count the errors of a sentence.
    metric: Metric,
    /// Which tokens are excluded from the scores.
    punctuation: PunctuationFilter,
    /// Column tested by the punctuation filter. The original evaluation scripts use column 5.
    punctuation_column: TagColumn,
    /// Column used to group the erroneous tokens in the diagnostics.
    pos_column: TagColumn,
    /// Do we compute the diagnostics (sentence length factors, postag factors and worst
    /// sentences)?
    detailed: bool,
    /// How many of the worst sentences are reported.
    top_n: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            punctuation: PunctuationFilter::default(),
            punctuation_column: TagColumn::Features,
            pos_column: TagColumn::CoarsePos,
            detailed: false,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl EvalConfig {
    pub fn metric(&self) -> Metric {
        self.metric
    }
    pub fn punctuation(&self) -> &PunctuationFilter {
        &self.punctuation
    }
    pub fn punctuation_column(&self) -> TagColumn {
        self.punctuation_column
    }
    pub fn pos_column(&self) -> TagColumn {
        self.pos_column
    }
    pub fn detailed(&self) -> bool {
        self.detailed
    }
    pub fn top_n(&self) -> usize {
        self.top_n
    }
}

impl Display for EvalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Metric: {}\n Punctuation filter: {} (column {})\n Postag column: {}\n Detailed: {}\n Worst sentences reported: {}",
            self.metric,
            self.punctuation,
            self.punctuation_column.position(),
            self.pos_column.position(),
            self.detailed,
            self.top_n
        )
    }
}

impl From<EvalConfigBuilder> for EvalConfig {
    fn from(value: EvalConfigBuilder) -> Self {
        value.config
    }
}

/// This builder can be used to build and customize an `EvalConfig` stucture.
#[derive(Debug, Default)]
pub struct EvalConfigBuilder {
    config: EvalConfig,
}

impl EvalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn metric(mut self, metric: Metric) -> Self {
        self.config.metric = metric;
        self
    }
    pub fn labeled(self, labeled: bool) -> Self {
        self.metric(Metric::from_labeled(labeled))
    }
    pub fn punctuation(mut self, punctuation: PunctuationFilter) -> Self {
        self.config.punctuation = punctuation;
        self
    }
    pub fn punctuation_column(mut self, column: TagColumn) -> Self {
        self.config.punctuation_column = column;
        self
    }
    pub fn pos_column(mut self, column: TagColumn) -> Self {
        self.config.pos_column = column;
        self
    }
    pub fn detailed(mut self, detailed: bool) -> Self {
        self.config.detailed = detailed;
        self
    }
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.config.top_n = top_n;
        self
    }
    pub fn build(self) -> EvalConfig {
        EvalConfig::from(self)
    }
}
