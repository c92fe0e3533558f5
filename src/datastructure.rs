use crate::conll::TokenRecord;

/// Custom datastructure holding every sentence of a CoNLL file. The tokens of all the sentences
/// are stored contiguously and the sentences are views over that slice, delimited by `indices`.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct Dataset<'a> {
    pub(crate) tokens: Box<[TokenRecord<'a>]>,
    /// Offsets of the sentences into `tokens`. Always starts with a `0` and has one more element
    /// than there are sentences.
    pub(crate) indices: Box<[usize]>,
    /// Verbatim text of each sentence block.
    pub(crate) texts: Box<[&'a str]>,
}

impl<'a> Dataset<'a> {
    pub(crate) fn from_parts(
        tokens: Vec<TokenRecord<'a>>,
        indices: Vec<usize>,
        texts: Vec<&'a str>,
    ) -> Self {
        debug_assert_eq!(indices.len(), texts.len() + 1);
        debug_assert_eq!(indices.last().copied(), Some(tokens.len()));
        Self {
            tokens: tokens.into_boxed_slice(),
            indices: indices.into_boxed_slice(),
            texts: texts.into_boxed_slice(),
        }
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Number of token lines in the whole dataset, punctuation included.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns the sentence at position `index`, if any.
    pub fn get<'d>(&'d self, index: usize) -> Option<Sentence<'d, 'a>> {
        let start = *self.indices.get(index)?;
        let end = *self.indices.get(index + 1)?;
        Some(Sentence {
            index,
            tokens: self.tokens.get(start..end)?,
            text: *self.texts.get(index)?,
        })
    }

    /// Iterates over the sentences, in the order of the file.
    pub fn iter<'d>(&'d self) -> SentenceIter<'d, 'a> {
        SentenceIter::new(self)
    }
}

impl<'d, 'a> IntoIterator for &'d Dataset<'a> {
    type Item = Sentence<'d, 'a>;
    type IntoIter = SentenceIter<'d, 'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A single sentence of a `Dataset`: one block of contiguous non-blank lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'d, 'a> {
    index: usize,
    tokens: &'d [TokenRecord<'a>],
    text: &'a str,
}

impl<'d, 'a> Sentence<'d, 'a> {
    /// Position of the sentence in the dataset, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn tokens(&self) -> &'d [TokenRecord<'a>] {
        self.tokens
    }
    /// The original block of lines, without the trailing separator.
    pub fn text(&self) -> &'a str {
        self.text
    }
    /// Length of the sentence before any filtering, i.e. its number of lines.
    pub fn raw_len(&self) -> usize {
        self.tokens.len()
    }
}

pub struct SentenceIter<'d, 'a> {
    dataset: &'d Dataset<'a>,
    position: usize,
}

impl<'d, 'a> SentenceIter<'d, 'a> {
    fn new(dataset: &'d Dataset<'a>) -> Self {
        Self {
            dataset,
            position: 0,
        }
    }
}

impl<'d, 'a> Iterator for SentenceIter<'d, 'a> {
    type Item = Sentence<'d, 'a>;
    fn next(&mut self) -> Option<Self::Item> {
        let sentence = self.dataset.get(self.position)?;
        self.position += 1;
        Some(sentence)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<'d, 'a> ExactSizeIterator for SentenceIter<'d, 'a> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conll::parse_dataset;

    const TWO_SENTENCES: &str = "\
1\tThe\tthe\tDT\tDT\tDT\t2\tNMOD\t2\tNMOD
2\tdog\tdog\tNN\tNN\tNN\t0\tROOT\t0\tROOT

1\tIt\tit\tPRP\tPRP\tPRP\t2\tSBJ\t2\tSBJ
2\tbarks\tbark\tVBZ\tVBZ\tVBZ\t0\tROOT\t0\tROOT
3\t.\t.\t.\t.\t.\t2\tP\t2\tP";

    #[test]
    fn test_iter_returns_every_sentence_in_order() {
        let dataset = parse_dataset(TWO_SENTENCES).unwrap();
        let lengths: Vec<_> = dataset.iter().map(|s| (s.index(), s.raw_len())).collect();
        assert_eq!(lengths, vec![(0, 2), (1, 3)]);
        assert_eq!(dataset.iter().len(), 2);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let dataset = parse_dataset(TWO_SENTENCES).unwrap();
        assert!(dataset.get(2).is_none());
        assert_eq!(dataset.get(1).unwrap().tokens()[2].word, ".");
    }

    #[test]
    fn test_empty_dataset_iter() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.iter().count(), 0);
    }

    #[test]
    fn test_sentence_text_is_verbatim() {
        let dataset = parse_dataset(TWO_SENTENCES).unwrap();
        let first = dataset.get(0).unwrap();
        assert_eq!(
            first.text(),
            "1\tThe\tthe\tDT\tDT\tDT\t2\tNMOD\t2\tNMOD\n2\tdog\tdog\tNN\tNN\tNN\t0\tROOT\t0\tROOT"
        );
    }
}
