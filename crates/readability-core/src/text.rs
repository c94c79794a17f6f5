//! Text tokenization.
//!
//! Splits raw text into sentences and words for the metrics engine.
//!
//! A sentence ends after a run of `.`, `!` or `?`; the whole run is one
//! boundary, so `"Wait... really?!"` is two sentences. A word is a maximal run
//! of letters, optionally joined by apostrophes that sit between two letters
//! (`don't`, `we’re`). Everything else is a delimiter.

/// A sentence, as the ordered words it contains.
///
/// Words borrow from the analysed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    words: Vec<&'a str>,
}

impl<'a> Sentence<'a> {
    /// Build a sentence from its words.
    pub const fn new(words: Vec<&'a str>) -> Self {
        Self { words }
    }

    /// The words of this sentence, in order.
    pub fn words(&self) -> &[&'a str] {
        &self.words
    }

    /// Number of words in the sentence.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the sentence has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Split text into sentences of words, dropping sentences without words.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> Vec<Sentence<'_>> {
    split_sentences(text)
        .into_iter()
        .map(|raw| Sentence::new(extract_words(raw)))
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Split text into raw sentence slices.
///
/// Each slice keeps its terminating punctuation and is trimmed of surrounding
/// whitespace. Whitespace-only fragments are skipped; fragments without words
/// (`"42."`) are kept here and dropped by [`tokenize`].
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if !is_sentence_terminator(ch) {
            continue;
        }

        // Consecutive terminators collapse into one boundary
        while chars.next_if(|&(_, next)| is_sentence_terminator(next)).is_some() {}

        let end = chars.peek().map_or(text.len(), |&(idx, _)| idx);
        push_trimmed(&mut sentences, &text[start..end]);
        start = end;
    }

    // Remaining text
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

/// Extract words in order, ignoring sentence structure.
pub fn extract_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch.is_alphabetic() {
            start.get_or_insert(idx);
            continue;
        }

        let joins_letters = is_apostrophe(ch)
            && start.is_some()
            && chars.peek().is_some_and(|&(_, next)| next.is_alphabetic());
        if joins_letters {
            continue;
        }

        if let Some(begin) = start.take() {
            words.push(&text[begin..idx]);
        }
    }

    if let Some(begin) = start {
        words.push(&text[begin..]);
    }

    words
}

/// Count words without materializing them.
pub fn count_words(text: &str) -> usize {
    extract_words(text).len()
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, fragment: &'a str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        sentences.push(fragment);
    }
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

const fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence_lengths(text: &str) -> Vec<usize> {
        tokenize(text).iter().map(Sentence::len).collect()
    }

    #[test]
    fn basic_sentences() {
        let sentences = split_sentences("This is a sentence. This is another sentence.");
        assert_eq!(sentences, vec!["This is a sentence.", "This is another sentence."]);
    }

    #[test]
    fn question_and_exclamation() {
        let sentences = tokenize("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn consecutive_terminators_collapse() {
        assert_eq!(split_sentences("Wait... really?!"), vec!["Wait...", "really?!"]);
        assert_eq!(sentence_lengths("Wait... really?!"), vec![1, 1]);
    }

    #[test]
    fn trailing_text_forms_final_sentence() {
        assert_eq!(sentence_lengths("One here. And two more words"), vec![2, 4]);
        assert_eq!(sentence_lengths("Hello"), vec![1]);
    }

    #[test]
    fn sentences_without_words_are_dropped() {
        assert_eq!(split_sentences("Hi. 42. !!"), vec!["Hi.", "42.", "!!"]);
        assert_eq!(sentence_lengths("Hi. 42. !!"), vec![1]);
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn extract_words_basic() {
        let words = extract_words("Hello, world! This is a test.");
        assert_eq!(words, vec!["Hello", "world", "This", "is", "a", "test"]);
    }

    #[test]
    fn internal_apostrophes_join_words() {
        assert_eq!(extract_words("don't we’re o'clock"), vec!["don't", "we’re", "o'clock"]);
    }

    #[test]
    fn edge_apostrophes_are_delimiters() {
        assert_eq!(extract_words("'quoted' rock'n'roll' '"), vec![
            "quoted",
            "rock'n'roll"
        ]);
        assert_eq!(extract_words("it''s"), vec!["it", "s"]);
    }

    #[test]
    fn digits_and_symbols_are_not_words() {
        assert_eq!(count_words("There are not 234 words in this sentence."), 7);
        assert_eq!(extract_words("http://example.com/etc"), vec![
            "http", "example", "com", "etc"
        ]);
        assert_eq!(extract_words("abc123def"), vec!["abc", "def"]);
    }

    #[test]
    fn unicode_letters_are_word_characters() {
        assert_eq!(extract_words("café naïve Zürich"), vec!["café", "naïve", "Zürich"]);
    }

    #[test]
    fn word_count_matches_letter_runs() {
        let text = "  hi there   you people  ";
        assert_eq!(count_words(text), 4);
        let total: usize = tokenize(text).iter().map(Sentence::len).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn sentences_preserve_word_order() {
        let text = "We live in strange times. All evidence shows we’re driving ourselves \
                    to a climate breakdown! Really? Yes... it does.";
        let flattened: Vec<&str> = tokenize(text)
            .iter()
            .flat_map(|s| s.words().iter().copied())
            .collect();
        assert_eq!(flattened, extract_words(text));
    }

    #[test]
    fn boundary_never_splits_a_word() {
        let sentences = tokenize("Mr.Smith left!Then");
        let words: Vec<Vec<&str>> = sentences.iter().map(|s| s.words().to_vec()).collect();
        assert_eq!(words, vec![vec!["Mr"], vec!["Smith", "left"], vec!["Then"]]);
    }
}
