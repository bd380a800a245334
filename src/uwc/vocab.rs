use std::mem;

use rustc_hash::FxHashSet;

/// The unique normalized words found in one chunk.
pub type WordSet = FxHashSet<String>;

/// Union of every worker's `WordSet`. Owned and mutated only by the driver,
/// after all workers have been joined.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: WordSet,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `set` into the vocabulary. Words already present are not
    /// counted twice. The smaller set is always the one iterated, so merge
    /// cost is bounded by the smaller side.
    pub fn merge(&mut self, mut set: WordSet) {
        if set.len() > self.words.len() {
            mem::swap(&mut self.words, &mut set);
        }
        self.words.extend(set);
    }

    /// Number of distinct words: the reported answer.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// All words in byte order. Allocates; intended for tests and debugging.
    pub fn sorted_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

impl Extend<WordSet> for Vocabulary {
    fn extend<I: IntoIterator<Item = WordSet>>(&mut self, sets: I) {
        for set in sets {
            self.merge(set);
        }
    }
}

impl FromIterator<WordSet> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = WordSet>>(sets: I) -> Self {
        let mut vocab = Vocabulary::new();
        vocab.extend(sets);
        vocab
    }
}
