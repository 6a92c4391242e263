use crate::types::{CommonRun, WordSpan};

/// Locale-aware word-boundary segmentation. Implementations return only
/// word-like spans; punctuation and whitespace are dropped.
pub trait WordSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<WordSpan>;
}

pub trait SequenceDiffer: Send + Sync {
    /// Maximal common runs between two word sequences, in increasing index
    /// order on both sides.
    fn common_runs(&self, transcript: &[&str], asr: &[&str]) -> Vec<CommonRun>;
}
