use icu_segmenter::WordSegmenter as IcuSegmenter;

use crate::alignment::diff::common_runs;
use crate::pipeline::traits::{SequenceDiffer, WordSegmenter};
use crate::types::{CommonRun, WordSpan};

/// Dictionary-based UAX #29 word segmentation from ICU4X. Handles scripts
/// written without spaces (Thai, Lao, Khmer, Burmese, CJK).
pub struct IcuWordSegmenter {
    segmenter: IcuSegmenter,
}

impl IcuWordSegmenter {
    pub fn new() -> Self {
        Self {
            segmenter: IcuSegmenter::new_dictionary(),
        }
    }
}

impl Default for IcuWordSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSegmenter for IcuWordSegmenter {
    fn segment(&self, text: &str) -> Vec<WordSpan> {
        let mut breaks = self.segmenter.segment_str(text);

        let mut spans = Vec::new();
        let mut prev = 0usize;
        let mut chars_before = 0usize;
        while let Some(boundary) = breaks.next() {
            if boundary <= prev {
                continue;
            }
            let piece = &text[prev..boundary];
            // Dictionary breaks in complex scripts carry `WordType::None`.
            if breaks.is_word_like() || piece.chars().any(char::is_alphanumeric) {
                spans.push(WordSpan {
                    text: piece.to_string(),
                    char_offset: chars_before,
                });
            }
            chars_before += piece.chars().count();
            prev = boundary;
        }
        spans
    }
}

/// Splits on whitespace and strips punctuation from word edges. Suitable for
/// input that is already space-separated.
pub struct WhitespaceSegmenter;

impl WordSegmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<WordSpan> {
        let mut spans = Vec::new();
        let mut word = String::new();
        let mut word_start = 0usize;
        for (char_idx, c) in text.chars().chain(std::iter::once(' ')).enumerate() {
            if c.is_whitespace() {
                push_trimmed(&mut spans, &word, word_start);
                word.clear();
                word_start = char_idx + 1;
            } else {
                word.push(c);
            }
        }
        spans
    }
}

fn push_trimmed(spans: &mut Vec<WordSpan>, word: &str, word_start: usize) {
    let leading = word.chars().take_while(|&c| is_edge_punctuation(c)).count();
    let trimmed = word.trim_matches(is_edge_punctuation);
    if trimmed.is_empty() {
        return;
    }
    spans.push(WordSpan {
        text: trimmed.to_string(),
        char_offset: word_start + leading,
    });
}

// Combining marks are not alphanumeric, so edges are trimmed by punctuation
// instead of by `is_alphanumeric`.
fn is_edge_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2018}'
                | '\u{2019}'
                | '\u{201C}'
                | '\u{201D}'
                | '\u{2026}'
                | '\u{00AB}'
                | '\u{00BB}'
                | '\u{00BF}'
                | '\u{00A1}'
                | '\u{3001}'
                | '\u{3002}'
        )
}

pub struct MyersSequenceDiffer;

impl SequenceDiffer for MyersSequenceDiffer {
    fn common_runs(&self, transcript: &[&str], asr: &[&str]) -> Vec<CommonRun> {
        common_runs(transcript, asr)
    }
}
