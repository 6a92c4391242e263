use serde::Serialize;

use crate::alignment::rows::line_window;
use crate::types::{AlignmentOutput, Coverage, RowKind, TranscriptLine};

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    pub summary: ReportSummary,
    pub groups: Vec<GroupReport>,
    pub lines: Vec<LineReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub transcript_token_count: usize,
    pub asr_token_count: usize,
    pub group_count: usize,
    pub matched_group_count: usize,
    pub line_count: usize,
    pub unaligned_line_count: usize,
    pub silence_row_count: usize,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub matched: bool,
    pub transcript_words: String,
    pub asr_words: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Exact,
    Approx,
    Missing,
}

impl SpanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Approx => "approx",
            Self::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenSpan {
    pub text: String,
    pub char_start: usize,
    pub char_end: usize,
    pub kind: SpanKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineReport {
    pub text: String,
    /// Unrounded time window; absent when no token of the line was aligned.
    pub start: Option<f64>,
    pub end: Option<f64>,
    /// Inclusive range of anchoring ASR token indices.
    pub asr_range: Option<(usize, usize)>,
    /// ASR words within `asr_range`, space separated.
    pub asr_words: String,
    pub spans: Vec<TokenSpan>,
}

/// Piece of a line's text, either between tokens or covering one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkedSegment {
    pub text: String,
    pub kind: Option<SpanKind>,
}

pub fn build_report(output: &AlignmentOutput) -> AlignmentReport {
    let groups = output
        .groups
        .iter()
        .map(|group| GroupReport {
            matched: group.matched,
            transcript_words: join_words(
                group
                    .transcript_run(&output.transcript_tokens)
                    .iter()
                    .map(|t| t.text.as_str()),
            ),
            asr_words: join_words(group.asr_run(&output.asr_tokens).iter().map(|t| t.text.as_str())),
        })
        .collect::<Vec<_>>();

    let lines = output
        .lines
        .iter()
        .map(|line| build_line_report(output, line))
        .collect::<Vec<_>>();

    let summary = ReportSummary {
        transcript_token_count: output.transcript_tokens.len(),
        asr_token_count: output.asr_tokens.len(),
        group_count: groups.len(),
        matched_group_count: groups.iter().filter(|g| g.matched).count(),
        line_count: lines.len(),
        unaligned_line_count: count_rows(output, RowKind::UnalignedLine),
        silence_row_count: count_rows(output, RowKind::Silence),
        coverage: output.coverage(),
    };

    AlignmentReport {
        summary,
        groups,
        lines,
    }
}

fn build_line_report(output: &AlignmentOutput, line: &TranscriptLine) -> LineReport {
    let window = line_window(line, &output.alignments);

    let mut asr_range: Option<(usize, usize)> = None;
    let mut spans = Vec::with_capacity(line.tokens.len());
    for token_index in line.tokens.clone() {
        let token = &output.transcript_tokens[token_index];
        let alignment = output.alignment(token_index);
        let kind = match alignment {
            Some(a) if a.exact => SpanKind::Exact,
            Some(_) => SpanKind::Approx,
            None => SpanKind::Missing,
        };
        if let Some(a) = alignment {
            asr_range = Some(match asr_range {
                None => (a.asr_index, a.asr_index),
                Some((lo, hi)) => (lo.min(a.asr_index), hi.max(a.asr_index)),
            });
        }
        let range = token.char_range();
        spans.push(TokenSpan {
            text: token.text.clone(),
            char_start: range.start,
            char_end: range.end,
            kind,
            start: alignment.map(|a| a.start),
            end: alignment.map(|a| a.end),
        });
    }

    let asr_words = asr_range
        .map(|(lo, hi)| {
            join_words(
                output
                    .asr_tokens
                    .get(lo..=hi)
                    .unwrap_or(&[])
                    .iter()
                    .map(|t| t.text.as_str()),
            )
        })
        .unwrap_or_default();

    LineReport {
        text: line.text.clone(),
        start: window.map(|(start, _)| start),
        end: window.map(|(_, end)| end),
        asr_range,
        asr_words,
        spans,
    }
}

/// Split `text` into plain and token-covering pieces using the spans' character
/// offsets. Overlapping or out-of-range spans are ignored.
pub fn marked_segments(text: &str, spans: &[TokenSpan]) -> Vec<MarkedSegment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut pos = 0usize;

    for span in spans {
        if span.char_start < pos || span.char_end > chars.len() || span.char_end <= span.char_start
        {
            continue;
        }
        if span.char_start > pos {
            segments.push(MarkedSegment {
                text: chars[pos..span.char_start].iter().collect(),
                kind: None,
            });
        }
        segments.push(MarkedSegment {
            text: chars[span.char_start..span.char_end].iter().collect(),
            kind: Some(span.kind),
        });
        pos = span.char_end;
    }
    if pos < chars.len() {
        segments.push(MarkedSegment {
            text: chars[pos..].iter().collect(),
            kind: None,
        });
    }
    segments
}

fn count_rows(output: &AlignmentOutput, kind: RowKind) -> usize {
    output.rows.iter().filter(|row| row.kind == kind).count()
}

fn join_words<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words.collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alignment, AsrToken, DiffGroup, OutputRow, TranscriptToken};

    fn sample_output() -> AlignmentOutput {
        let transcript_tokens = vec![
            TranscriptToken {
                text: "hello".to_string(),
                char_offset: 0,
                line_index: 0,
            },
            TranscriptToken {
                text: "there".to_string(),
                char_offset: 7,
                line_index: 0,
            },
            TranscriptToken {
                text: "friend".to_string(),
                char_offset: 0,
                line_index: 1,
            },
        ];
        let asr_tokens = ["hello", "their", "x"]
            .iter()
            .enumerate()
            .map(|(i, w)| AsrToken {
                text: w.to_string(),
                start: i as f64,
                end: i as f64 + 1.0,
                sequence_index: i,
            })
            .collect();
        AlignmentOutput {
            lines: vec![
                TranscriptLine {
                    text: "hello, there".to_string(),
                    tokens: 0..2,
                },
                TranscriptLine {
                    text: "friend".to_string(),
                    tokens: 2..3,
                },
            ],
            transcript_tokens,
            asr_tokens,
            groups: vec![
                DiffGroup {
                    matched: false,
                    transcript: 0..0,
                    asr: 0..0,
                },
                DiffGroup {
                    matched: true,
                    transcript: 0..1,
                    asr: 0..1,
                },
                DiffGroup {
                    matched: false,
                    transcript: 1..2,
                    asr: 1..2,
                },
            ],
            alignments: vec![
                Some(Alignment {
                    start: 0.0,
                    end: 1.0,
                    exact: true,
                    asr_index: 0,
                }),
                Some(Alignment {
                    start: 1.0,
                    end: 2.0,
                    exact: false,
                    asr_index: 1,
                }),
                None,
            ],
            rows: vec![
                OutputRow {
                    text: "hello, there".to_string(),
                    start_time: 0.0,
                    end_time: 2.0,
                    kind: RowKind::Line,
                },
                OutputRow {
                    text: "friend".to_string(),
                    start_time: 2.0,
                    end_time: 2.0,
                    kind: RowKind::UnalignedLine,
                },
                OutputRow::silence(2.0),
            ],
        }
    }

    #[test]
    fn groups_list_joined_words() {
        let report = build_report(&sample_output());
        assert_eq!(report.groups.len(), 3);
        assert_eq!(report.groups[0].transcript_words, "");
        assert_eq!(report.groups[1].asr_words, "hello");
        assert_eq!(report.groups[2].transcript_words, "there");
        assert_eq!(report.groups[2].asr_words, "their");
    }

    #[test]
    fn line_reports_window_and_used_asr_words() {
        let report = build_report(&sample_output());
        let first = &report.lines[0];
        assert_eq!((first.start, first.end), (Some(0.0), Some(2.0)));
        assert_eq!(first.asr_range, Some((0, 1)));
        assert_eq!(first.asr_words, "hello their");
        let kinds: Vec<SpanKind> = first.spans.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SpanKind::Exact, SpanKind::Approx]);

        let second = &report.lines[1];
        assert!(second.start.is_none());
        assert!(second.asr_range.is_none());
        assert_eq!(second.asr_words, "");
        assert_eq!(second.spans[0].kind, SpanKind::Missing);
    }

    #[test]
    fn summary_counts() {
        let report = build_report(&sample_output());
        assert_eq!(report.summary.transcript_token_count, 3);
        assert_eq!(report.summary.matched_group_count, 1);
        assert_eq!(report.summary.unaligned_line_count, 1);
        assert_eq!(report.summary.silence_row_count, 1);
        assert_eq!(report.summary.coverage.missing, 1);
    }

    #[test]
    fn marked_segments_split_around_tokens() {
        let report = build_report(&sample_output());
        let line = &report.lines[0];
        let segments = marked_segments(&line.text, &line.spans);
        let pieces: Vec<(&str, Option<SpanKind>)> = segments
            .iter()
            .map(|s| (s.text.as_str(), s.kind))
            .collect();
        assert_eq!(
            pieces,
            vec![
                ("hello", Some(SpanKind::Exact)),
                (", ", None),
                ("there", Some(SpanKind::Approx)),
            ]
        );
    }

    #[test]
    fn marked_segments_handle_multibyte_text() {
        let spans = vec![TokenSpan {
            text: "ครับ".to_string(),
            char_start: 7,
            char_end: 11,
            kind: SpanKind::Missing,
            start: None,
            end: None,
        }];
        let segments = marked_segments("สวัสดี ครับ!", &spans);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "สวัสดี ");
        assert_eq!(segments[1].text, "ครับ");
        assert_eq!(segments[2].text, "!");
    }

    #[test]
    fn report_serializes_span_kind_lowercase() {
        let report = build_report(&sample_output());
        let json = serde_json::to_string(&report.lines[0].spans[1]).expect("serialize");
        assert!(json.contains("\"kind\":\"approx\""));
    }
}
