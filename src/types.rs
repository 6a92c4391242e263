use std::ops::Range;

use serde::Serialize;

/// Word-like span reported by a segmenter. `char_offset` counts Unicode scalar
/// values from the start of the segmented text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub text: String,
    pub char_offset: usize,
}

/// One recognizer result with its declared time span in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct AsrSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct AlignmentInput {
    /// Transcript lines in source order. Blank lines are allowed and ignored.
    pub lines: Vec<String>,
    pub segments: Vec<AsrSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptToken {
    pub text: String,
    pub char_offset: usize,
    /// Position of the owning line in `AlignmentOutput::lines`.
    pub line_index: usize,
}

impl TranscriptToken {
    /// Character range of the token within its source line.
    pub fn char_range(&self) -> Range<usize> {
        self.char_offset..self.char_offset + self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub text: String,
    /// Indices into the flat transcript token sequence.
    pub tokens: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsrToken {
    pub text: String,
    pub start: f64,
    pub end: f64,
    /// Position in the flattened ASR token stream.
    pub sequence_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Alignment {
    pub start: f64,
    pub end: f64,
    /// True iff the token came from a matched group.
    pub exact: bool,
    /// Global index of the ASR token anchoring `start`.
    pub asr_index: usize,
}

/// Maximal common run reported by the sequence diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommonRun {
    pub len: usize,
    pub transcript_start: usize,
    pub asr_start: usize,
}

impl CommonRun {
    pub fn transcript_end(&self) -> usize {
        self.transcript_start + self.len
    }

    pub fn asr_end(&self) -> usize {
        self.asr_start + self.len
    }
}

/// Contiguous span of both token streams, either matched or unmatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffGroup {
    pub matched: bool,
    pub transcript: Range<usize>,
    pub asr: Range<usize>,
}

impl DiffGroup {
    pub fn transcript_run<'a>(&self, tokens: &'a [TranscriptToken]) -> &'a [TranscriptToken] {
        &tokens[self.transcript.clone()]
    }

    pub fn asr_run<'a>(&self, tokens: &'a [AsrToken]) -> &'a [AsrToken] {
        &tokens[self.asr.clone()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Line,
    /// Source line none of whose tokens received an alignment.
    UnalignedLine,
    Silence,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub text: String,
    /// Seconds, rounded to one decimal.
    pub start_time: f64,
    /// Seconds, rounded to one decimal.
    pub end_time: f64,
    pub kind: RowKind,
}

impl OutputRow {
    pub(crate) fn silence(at: f64) -> Self {
        Self {
            text: String::new(),
            start_time: at,
            end_time: at,
            kind: RowKind::Silence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Coverage {
    pub exact: usize,
    pub approximate: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentOutput {
    pub lines: Vec<TranscriptLine>,
    pub transcript_tokens: Vec<TranscriptToken>,
    pub asr_tokens: Vec<AsrToken>,
    pub groups: Vec<DiffGroup>,
    /// Parallel to `transcript_tokens`.
    pub alignments: Vec<Option<Alignment>>,
    pub rows: Vec<OutputRow>,
}

impl AlignmentOutput {
    pub fn alignment(&self, token_index: usize) -> Option<&Alignment> {
        self.alignments.get(token_index).and_then(Option::as_ref)
    }

    pub fn line_tokens(&self, line: &TranscriptLine) -> &[TranscriptToken] {
        &self.transcript_tokens[line.tokens.clone()]
    }

    pub fn coverage(&self) -> Coverage {
        let mut coverage = Coverage::default();
        for alignment in &self.alignments {
            match alignment {
                Some(a) if a.exact => coverage.exact += 1,
                Some(_) => coverage.approximate += 1,
                None => coverage.missing += 1,
            }
        }
        coverage
    }
}
