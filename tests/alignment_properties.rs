use asr_align_rs::{
    AlignerConfig, AlignmentInput, AlignmentOutput, AsrSegment, RowKind, TrailingGroups,
    TranscriptAligner, TranscriptAlignerBuilder, WhitespaceSegmenter,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 42;
const ROUNDS: usize = 200;
const VOCAB_SIZE: usize = 12;

fn aligner(trailing_groups: TrailingGroups) -> TranscriptAligner {
    let config = AlignerConfig {
        trailing_groups,
        ..AlignerConfig::default()
    };
    TranscriptAlignerBuilder::new(config)
        .with_segmenter(Box::new(WhitespaceSegmenter))
        .build()
        .expect("build should succeed")
}

fn word(rng: &mut StdRng) -> String {
    format!("w{}", rng.gen_range(0..VOCAB_SIZE))
}

/// Random transcript plus a noisy recognition of it with non-decreasing,
/// non-overlapping segment times.
fn random_input(rng: &mut StdRng) -> AlignmentInput {
    let line_count = rng.gen_range(1..6);
    let mut lines = Vec::with_capacity(line_count);
    let mut spoken = Vec::new();
    for _ in 0..line_count {
        let words: Vec<String> = (0..rng.gen_range(0..7)).map(|_| word(rng)).collect();
        spoken.extend(words.iter().cloned());
        lines.push(words.join(" "));
    }

    let mut heard = Vec::new();
    for w in spoken {
        match rng.gen_range(0..10) {
            0 => {}
            1 => heard.push(word(rng)),
            2 => {
                heard.push(word(rng));
                heard.push(w);
            }
            _ => heard.push(w),
        }
    }

    let mut segments = Vec::new();
    let mut cursor = 0.0f64;
    let mut rest = heard.as_slice();
    while !rest.is_empty() {
        let take = rng.gen_range(1..=rest.len().min(4));
        let (chunk, tail) = rest.split_at(take);
        cursor += rng.gen_range(0.0..0.5);
        let start_time = cursor;
        cursor += rng.gen_range(0.1..2.0);
        segments.push(AsrSegment {
            start_time,
            end_time: cursor,
            text: chunk.join(" "),
        });
        rest = tail;
    }

    AlignmentInput { lines, segments }
}

fn for_each_case(trailing_groups: TrailingGroups, check: impl Fn(&AlignmentInput, &AlignmentOutput)) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let aligner = aligner(trailing_groups);
    for _ in 0..ROUNDS {
        let input = random_input(&mut rng);
        let output = aligner.align(&input);
        check(&input, &output);
    }
}

#[test]
fn groups_partition_both_streams_in_order() {
    for_each_case(TrailingGroups::Omit, |_, output| {
        let mut next_t = 0;
        let mut next_a = 0;
        for group in &output.groups {
            assert_eq!(group.transcript.start, next_t);
            assert_eq!(group.asr.start, next_a);
            next_t = group.transcript.end;
            next_a = group.asr.end;
        }
        assert!(next_t <= output.transcript_tokens.len());
        assert!(next_a <= output.asr_tokens.len());
    });
}

#[test]
fn emitted_trailing_group_covers_everything() {
    for_each_case(TrailingGroups::Emit, |_, output| {
        let covered_t: usize = output.groups.iter().map(|g| g.transcript.len()).sum();
        let covered_a: usize = output.groups.iter().map(|g| g.asr.len()).sum();
        assert_eq!(covered_t, output.transcript_tokens.len());
        assert_eq!(covered_a, output.asr_tokens.len());
    });
}

#[test]
fn exact_flag_matches_group_kind() {
    for_each_case(TrailingGroups::Omit, |_, output| {
        for group in &output.groups {
            for token_index in group.transcript.clone() {
                let Some(alignment) = output.alignment(token_index) else {
                    assert!(group.asr.is_empty(), "token in group with ASR words left unaligned");
                    continue;
                };
                assert_eq!(alignment.exact, group.matched);
                if alignment.exact {
                    assert_eq!(
                        output.asr_tokens[alignment.asr_index].text,
                        output.transcript_tokens[token_index].text
                    );
                }
            }
        }
    });
}

#[test]
fn starts_are_monotonic_within_lines() {
    for_each_case(TrailingGroups::Emit, |_, output| {
        for line in &output.lines {
            let starts: Vec<f64> = line
                .tokens
                .clone()
                .filter_map(|i| output.alignment(i).map(|a| a.start))
                .collect();
            for pair in starts.windows(2) {
                assert!(pair[0] <= pair[1] + 1e-9, "non-monotonic starts: {starts:?}");
            }
        }
    });
}

#[test]
fn rows_cover_every_line_and_close_with_silence() {
    for_each_case(TrailingGroups::Omit, |input, output| {
        let non_blank = input.lines.iter().filter(|l| !l.trim().is_empty()).count();
        let line_rows = output
            .rows
            .iter()
            .filter(|r| r.kind != RowKind::Silence)
            .count();
        assert_eq!(line_rows, non_blank);
        assert_eq!(output.rows.last().map(|r| r.kind), Some(RowKind::Silence));
        assert!(output
            .rows
            .iter()
            .all(|r| r.start_time.is_finite() && r.end_time.is_finite()));
    });
}

#[test]
fn alignment_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let aligner = aligner(TrailingGroups::Omit);
    for _ in 0..ROUNDS / 4 {
        let input = random_input(&mut rng);
        assert_eq!(aligner.align(&input).rows, aligner.align(&input).rows);
    }
}
