/*!
Parsing of CoNLL files carrying both the gold and the predicted annotations. Every non-blank line
is a token and must have at least ten whitespace-separated columns:

| column | content              |
|--------|----------------------|
| 0      | index                |
| 1      | word                 |
| 2      | lemma                |
| 3      | coarse part-of-speech|
| 4      | fine part-of-speech  |
| 5      | features             |
| 6      | gold head            |
| 7      | gold label           |
| 8      | predicted head       |
| 9      | predicted label      |

Sentences are separated by blank lines.
*/
use crate::config::TagColumn;
use crate::datastructure::Dataset;
use itertools::Itertools;
use std::{error::Error, fmt::Display};

/// Minimum number of columns of a token line.
pub const REQUIRED_COLUMNS: usize = 10;

/// A single token line. The fields borrow from the parsed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenRecord<'a> {
    pub index: &'a str,
    pub word: &'a str,
    pub lemma: &'a str,
    pub coarse_pos: &'a str,
    pub fine_pos: &'a str,
    pub features: &'a str,
    pub gold_head: &'a str,
    pub gold_label: &'a str,
    pub pred_head: &'a str,
    pub pred_label: &'a str,
}

impl<'a> TokenRecord<'a> {
    /// Parses a line into a `TokenRecord`. Extra columns are ignored. On failure, returns the
    /// number of columns found.
    fn from_line(line: &'a str) -> Result<Self, usize> {
        match line.split_whitespace().next_tuple() {
            Some((
                index,
                word,
                lemma,
                coarse_pos,
                fine_pos,
                features,
                gold_head,
                gold_label,
                pred_head,
                pred_label,
            )) => Ok(TokenRecord {
                index,
                word,
                lemma,
                coarse_pos,
                fine_pos,
                features,
                gold_head,
                gold_label,
                pred_head,
                pred_label,
            }),
            None => Err(line.split_whitespace().count()),
        }
    }

    /// Returns the tag found in `column`.
    pub fn tag(&self, column: TagColumn) -> &'a str {
        match column {
            TagColumn::CoarsePos => self.coarse_pos,
            TagColumn::FinePos => self.fine_pos,
            TagColumn::Features => self.features,
        }
    }

    pub fn head_is_correct(&self) -> bool {
        self.gold_head == self.pred_head
    }

    pub fn label_is_correct(&self) -> bool {
        self.gold_label == self.pred_label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A non-blank line does not have enough columns.
pub struct MalformedLineError {
    /// Line number in the input, starting at 1.
    pub line: usize,
    /// Index of the sentence containing the line, starting at 0.
    pub sentence: usize,
    /// Number of columns found on the line.
    pub found: usize,
}

impl Display for MalformedLineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Malformed line {} (sentence {}): expected at least {} columns, found {}",
            self.line, self.sentence, REQUIRED_COLUMNS, self.found
        )
    }
}

impl Error for MalformedLineError {}

/// Parses the content of a CoNLL file into a `Dataset`.
///
/// Leading and trailing blank lines are ignored and runs of blank lines count as a single
/// separator. A line containing only whitespace is blank. Parsing stops at the first line with
/// less than ten columns.
///
/// # Example
/// ```rust
/// use depeval::parse_dataset;
///
/// let content = "1\tHi\thi\tUH\tUH\t_\t0\tROOT\t0\tROOT\n\n\
///                1\tBye\tbye\tUH\tUH\t_\t0\tROOT\t0\tROOT\n";
/// let dataset = parse_dataset(content).unwrap();
/// assert_eq!(dataset.len(), 2);
/// ```
pub fn parse_dataset(content: &str) -> Result<Dataset<'_>, MalformedLineError> {
    let mut tokens = Vec::new();
    let mut indices = vec![0];
    let mut texts = Vec::new();
    // Byte span of the block being read.
    let mut block: Option<(usize, usize)> = None;
    let mut offset = 0;

    for (line_number, raw_line) in content.split_inclusive('\n').enumerate() {
        let line = raw_line.trim_end_matches(['\n', '\r']);
        let start = offset;
        offset += raw_line.len();

        if line.trim().is_empty() {
            if let Some((block_start, block_end)) = block.take() {
                texts.push(&content[block_start..block_end]);
                indices.push(tokens.len());
            }
            continue;
        }

        let token = TokenRecord::from_line(line).map_err(|found| MalformedLineError {
            line: line_number + 1,
            sentence: texts.len(),
            found,
        })?;
        tokens.push(token);
        let end = start + line.len();
        block = match block {
            Some((block_start, _)) => Some((block_start, end)),
            None => Some((start, end)),
        };
    }
    if let Some((block_start, block_end)) = block {
        texts.push(&content[block_start..block_end]);
        indices.push(tokens.len());
    }
    Ok(Dataset::from_parts(tokens, indices, texts))
}
