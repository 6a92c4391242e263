pub mod alignment;
pub mod config;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod tsv;
pub mod types;

pub use alignment::report::{
    build_report, marked_segments, AlignmentReport, GroupReport, LineReport, MarkedSegment,
    ReportSummary, SpanKind, TokenSpan,
};
pub use config::{AlignerConfig, TrailingGroups};
pub use error::AlignmentError;
pub use pipeline::builder::TranscriptAlignerBuilder;
pub use pipeline::defaults::{IcuWordSegmenter, MyersSequenceDiffer, WhitespaceSegmenter};
pub use pipeline::runtime::TranscriptAligner;
pub use pipeline::traits::{SequenceDiffer, WordSegmenter};
pub use types::{
    Alignment, AlignmentInput, AlignmentOutput, AsrSegment, AsrToken, CommonRun, Coverage,
    DiffGroup, OutputRow, RowKind, TranscriptLine, TranscriptToken, WordSpan,
};
