use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::pipeline::defaults::{IcuWordSegmenter, MyersSequenceDiffer};
use crate::pipeline::runtime::{TranscriptAligner, TranscriptAlignerParts};
use crate::pipeline::traits::{SequenceDiffer, WordSegmenter};

pub struct TranscriptAlignerBuilder {
    config: AlignerConfig,
    segmenter: Option<Box<dyn WordSegmenter>>,
    sequence_differ: Option<Box<dyn SequenceDiffer>>,
}

impl TranscriptAlignerBuilder {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            config,
            segmenter: None,
            sequence_differ: None,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn WordSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn with_sequence_differ(mut self, sequence_differ: Box<dyn SequenceDiffer>) -> Self {
        self.sequence_differ = Some(sequence_differ);
        self
    }

    pub fn build(self) -> Result<TranscriptAligner, AlignmentError> {
        self.config.validate()?;

        Ok(TranscriptAligner::from_parts(TranscriptAlignerParts {
            config: self.config,
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Box::new(IcuWordSegmenter::new())),
            sequence_differ: self
                .sequence_differ
                .unwrap_or_else(|| Box::new(MyersSequenceDiffer)),
        }))
    }
}
