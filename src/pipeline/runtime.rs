use crate::alignment::grouping::build_groups;
use crate::alignment::interpolation::interpolate;
use crate::alignment::rows::assemble_rows;
use crate::alignment::tokenization::{expand_asr_segments, tokenize_transcript};
use crate::config::AlignerConfig;
use crate::pipeline::traits::{SequenceDiffer, WordSegmenter};
use crate::types::{AlignmentInput, AlignmentOutput};

pub struct TranscriptAligner {
    config: AlignerConfig,
    segmenter: Box<dyn WordSegmenter>,
    sequence_differ: Box<dyn SequenceDiffer>,
}

pub(crate) struct TranscriptAlignerParts {
    pub config: AlignerConfig,
    pub segmenter: Box<dyn WordSegmenter>,
    pub sequence_differ: Box<dyn SequenceDiffer>,
}

impl TranscriptAligner {
    pub(crate) fn from_parts(parts: TranscriptAlignerParts) -> Self {
        Self {
            config: parts.config,
            segmenter: parts.segmenter,
            sequence_differ: parts.sequence_differ,
        }
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Align transcript lines against ASR segments.
    ///
    /// Pure with respect to its input: tokens that cannot be placed stay
    /// unaligned and lines without timing fall back to the previous row's end,
    /// so the run never fails on content.
    pub fn align(&self, input: &AlignmentInput) -> AlignmentOutput {
        let (lines, transcript_tokens) = tokenize_transcript(&input.lines, self.segmenter.as_ref());
        let asr_tokens = expand_asr_segments(&input.segments, self.segmenter.as_ref());
        tracing::debug!(
            line_count = lines.len(),
            transcript_words = transcript_tokens.len(),
            asr_words = asr_tokens.len(),
            "aligner: tokenized inputs"
        );

        let transcript_words: Vec<&str> = transcript_tokens.iter().map(|t| t.text.as_str()).collect();
        let asr_words: Vec<&str> = asr_tokens.iter().map(|t| t.text.as_str()).collect();
        let runs = self
            .sequence_differ
            .common_runs(&transcript_words, &asr_words);

        let groups = build_groups(
            &runs,
            transcript_tokens.len(),
            asr_tokens.len(),
            self.config.trailing_groups,
        );
        let alignments = interpolate(&groups, &asr_tokens, transcript_tokens.len());
        let rows = assemble_rows(&lines, &alignments, self.config.silence_gap_secs);

        let output = AlignmentOutput {
            lines,
            transcript_tokens,
            asr_tokens,
            groups,
            alignments,
            rows,
        };
        let coverage = output.coverage();
        tracing::info!(
            groups = output.groups.len(),
            exact = coverage.exact,
            approximate = coverage.approximate,
            missing = coverage.missing,
            rows = output.rows.len(),
            "aligner: alignment complete"
        );
        output
    }
}
