use crate::pipeline::traits::WordSegmenter;
use crate::types::{AsrSegment, AsrToken, TranscriptLine, TranscriptToken};

/// Split transcript lines into word tokens, dropping lines without visible content.
///
/// Tokens are returned as one flat sequence in line order; each kept line records
/// the index range of its tokens in that sequence.
pub fn tokenize_transcript(
    lines: &[String],
    segmenter: &dyn WordSegmenter,
) -> (Vec<TranscriptLine>, Vec<TranscriptToken>) {
    let mut kept = Vec::new();
    let mut tokens = Vec::new();

    for text in lines {
        if text.trim().is_empty() {
            continue;
        }
        let line_index = kept.len();
        let first = tokens.len();
        for span in segmenter.segment(text) {
            tokens.push(TranscriptToken {
                text: span.text,
                char_offset: span.char_offset,
                line_index,
            });
        }
        kept.push(TranscriptLine {
            text: text.clone(),
            tokens: first..tokens.len(),
        });
    }

    (kept, tokens)
}

/// Expand recognizer segments into per-word tokens.
///
/// The recognizer only reports timing per segment, so a segment's duration is
/// split into equal shares by word position.
pub fn expand_asr_segments(
    segments: &[AsrSegment],
    segmenter: &dyn WordSegmenter,
) -> Vec<AsrToken> {
    let mut tokens = Vec::new();

    for (segment_idx, segment) in segments.iter().enumerate() {
        if !segment.start_time.is_finite() || !segment.end_time.is_finite() {
            tracing::warn!(
                segment_idx,
                start_time = segment.start_time,
                end_time = segment.end_time,
                "skipping ASR segment with non-finite timing"
            );
            continue;
        }

        let words = segmenter.segment(&segment.text);
        if words.is_empty() {
            continue;
        }

        let start_time = segment.start_time;
        let end_time = if segment.end_time < start_time {
            tracing::warn!(
                segment_idx,
                start_time,
                end_time = segment.end_time,
                "ASR segment ends before it starts; treating it as zero-length"
            );
            start_time
        } else {
            segment.end_time
        };

        let duration = end_time - start_time;
        let n = words.len() as f64;
        for (i, word) in words.into_iter().enumerate() {
            let i = i as f64;
            tokens.push(AsrToken {
                text: word.text,
                start: start_time + (i / n) * duration,
                end: start_time + ((i + 1.0) / n) * duration,
                sequence_index: tokens.len(),
            });
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::defaults::WhitespaceSegmenter;

    fn segment(start_time: f64, end_time: f64, text: &str) -> AsrSegment {
        AsrSegment {
            start_time,
            end_time,
            text: text.to_string(),
        }
    }

    #[test]
    fn blank_lines_are_dropped() {
        let lines = vec![
            "hello world".to_string(),
            "   ".to_string(),
            String::new(),
            "again".to_string(),
        ];
        let (kept, tokens) = tokenize_transcript(&lines, &WhitespaceSegmenter);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].tokens, 0..2);
        assert_eq!(kept[1].tokens, 2..3);
        assert_eq!(tokens[2].text, "again");
        assert_eq!(tokens[2].line_index, 1);
    }

    #[test]
    fn line_without_word_tokens_is_kept_with_empty_range() {
        let lines = vec!["...".to_string(), "next".to_string()];
        let (kept, tokens) = tokenize_transcript(&lines, &WhitespaceSegmenter);
        assert_eq!(kept.len(), 2);
        assert!(kept[0].tokens.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].line_index, 1);
    }

    #[test]
    fn char_offsets_are_per_line() {
        let lines = vec!["ab cd".to_string(), "  ef".to_string()];
        let (_, tokens) = tokenize_transcript(&lines, &WhitespaceSegmenter);
        let offsets: Vec<usize> = tokens.iter().map(|t| t.char_offset).collect();
        assert_eq!(offsets, vec![0, 3, 2]);
    }

    #[test]
    fn segment_duration_is_split_evenly() {
        let tokens = expand_asr_segments(&[segment(1.0, 2.0, "a b")], &WhitespaceSegmenter);
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].start, tokens[0].end), (1.0, 1.5));
        assert_eq!((tokens[1].start, tokens[1].end), (1.5, 2.0));
    }

    #[test]
    fn sequence_index_is_global() {
        let tokens = expand_asr_segments(
            &[segment(0.0, 1.0, "a b"), segment(1.0, 4.0, "c d e")],
            &WhitespaceSegmenter,
        );
        let indices: Vec<usize> = tokens.iter().map(|t| t.sequence_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(tokens[3].start, 2.0);
        assert_eq!(tokens[4].end, 4.0);
    }

    #[test]
    fn empty_segments_contribute_nothing() {
        let tokens = expand_asr_segments(
            &[segment(0.0, 1.0, ""), segment(1.0, 2.0, "?!"), segment(2.0, 3.0, "x")],
            &WhitespaceSegmenter,
        );
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].sequence_index, 0);
        assert_eq!(tokens[0].start, 2.0);
    }

    #[test]
    fn reversed_segment_collapses_to_start_time() {
        let tokens = expand_asr_segments(&[segment(3.0, 2.0, "a b")], &WhitespaceSegmenter);
        assert!(tokens.iter().all(|t| t.start == 3.0 && t.end == 3.0));
    }

    #[test]
    fn non_finite_segment_is_skipped() {
        let tokens = expand_asr_segments(
            &[segment(f64::NAN, 2.0, "a"), segment(2.0, 3.0, "b")],
            &WhitespaceSegmenter,
        );
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "b");
        assert_eq!(tokens[0].sequence_index, 0);
    }
}
