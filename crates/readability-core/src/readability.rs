//! Readability scoring: Flesch-Kincaid Grade Level and Flesch Reading Ease.
//!
//! Grade: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!
//! Ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Lower grade and higher ease mean more readable text. Text without words
//! scores [`SENTINEL`] on both formulas instead of dividing by zero.
//!
//! Scores leave this module as two-decimal strings (see
//! [`format_two_decimals`]), which is the form the HTTP API returns.

use serde::{Deserialize, Serialize};

use crate::syllables::estimate_syllables;
use crate::text::{self, Sentence};

/// Score reported for text that has no words.
pub const SENTINEL: f64 = 0.0;

/// A metric the service can report on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Metric {
    /// Flesch-Kincaid Grade Level.
    Fkgl,
    /// Flesch Reading Ease Score.
    Fres,
    /// Number of words.
    WordCount,
}

impl Metric {
    /// Returns the metric name as used in routes and CLI flags.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fkgl => "fkgl",
            Self::Fres => "fres",
            Self::WordCount => "word-count",
        }
    }

    /// JSON field that carries this metric in an API response.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Fkgl => "grade",
            Self::Fres => "score",
            Self::WordCount => "count",
        }
    }

    /// Render this metric from a report the way the API returns it.
    pub fn render(&self, report: &AnalysisReport) -> String {
        match self {
            Self::Fkgl => report.fkgl(),
            Self::Fres => report.fres(),
            Self::WordCount => report.words.to_string(),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analysing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of sentences that contain at least one word.
    pub sentences: usize,
    /// Number of words.
    pub words: usize,
    /// Total estimated syllables.
    pub syllables: usize,
    /// Average words per sentence (0 for empty text).
    pub words_per_sentence: f64,
    /// Average syllables per word (0 for empty text).
    pub syllables_per_word: f64,
    /// Flesch-Kincaid Grade Level, unrounded.
    pub grade: f64,
    /// Flesch Reading Ease Score, unrounded.
    pub score: f64,
}

impl AnalysisReport {
    /// Grade level as a two-decimal string.
    pub fn fkgl(&self) -> String {
        format_two_decimals(self.grade)
    }

    /// Reading ease as a two-decimal string.
    pub fn fres(&self) -> String {
        format_two_decimals(self.score)
    }

    /// Whether the analysed text had no words.
    pub const fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// The compact view handed to transports.
    pub fn summary(&self) -> TextSummary {
        TextSummary {
            word_count: self.words,
            sentence_count: self.sentences,
            fkgl: self.fkgl(),
            fres: self.fres(),
        }
    }
}

/// Word and sentence counts with both scores already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSummary {
    /// Number of words.
    pub word_count: usize,
    /// Number of sentences.
    pub sentence_count: usize,
    /// Flesch-Kincaid Grade Level, two decimals.
    pub fkgl: String,
    /// Flesch Reading Ease Score, two decimals.
    pub fres: String,
}

/// Compute counts and both formulas over tokenized sentences.
pub fn analyze(sentences: &[Sentence<'_>]) -> AnalysisReport {
    let words: usize = sentences.iter().map(Sentence::len).sum();
    let syllables: usize = sentences
        .iter()
        .flat_map(Sentence::words)
        .map(|word| estimate_syllables(word))
        .sum();

    if words == 0 {
        return AnalysisReport {
            sentences: 0,
            words: 0,
            syllables: 0,
            words_per_sentence: 0.0,
            syllables_per_word: 0.0,
            grade: SENTINEL,
            score: SENTINEL,
        };
    }

    let sentence_count = sentences.len();
    let words_per_sentence = words as f64 / sentence_count as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    let grade = 0.39f64.mul_add(words_per_sentence, 11.8 * syllables_per_word) - 15.59;
    let score = 84.6f64.mul_add(
        -syllables_per_word,
        1.015f64.mul_add(-words_per_sentence, 206.835),
    );

    AnalysisReport {
        sentences: sentence_count,
        words,
        syllables,
        words_per_sentence,
        syllables_per_word,
        grade,
        score,
    }
}

/// Tokenize and analyse raw text.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze_text(text: &str) -> AnalysisReport {
    let report = analyze(&text::tokenize(text));
    tracing::debug!(
        sentences = report.sentences,
        words = report.words,
        syllables = report.syllables,
        "text analysed"
    );
    report
}

/// Flesch-Kincaid Grade Level of `text`, two decimals.
pub fn flesch_kincaid_grade(text: &str) -> String {
    analyze_text(text).fkgl()
}

/// Flesch Reading Ease Score of `text`, two decimals.
pub fn flesch_reading_ease(text: &str) -> String {
    analyze_text(text).fres()
}

/// Number of words in `text`.
pub fn word_count(text: &str) -> usize {
    text::count_words(text)
}

/// Round half away from zero to two places and print fixed-point.
///
/// Always two fraction digits (`10.7` is `"10.70"`), never exponent notation,
/// and a value that rounds to zero prints as `"0.00"`, not `"-0.00"`.
pub fn format_two_decimals(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}
