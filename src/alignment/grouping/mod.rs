use crate::config::TrailingGroups;
use crate::types::{CommonRun, DiffGroup};


/// Fold state while walking the common runs: end of the last run on each side.
#[derive(Clone, Copy, Debug, Default)]
struct Cursor {
    transcript: usize,
    asr: usize,
}

/// Partition both token streams into alternating unmatched/matched groups.
///
/// Every common run yields an unmatched group covering the gap since the
/// previous run (possibly empty on either or both sides) followed by the
/// matched group itself. Tokens after the last run are only grouped when
/// `trailing` asks for it, or when the diff found no common run at all, in
/// which case both streams form a single unmatched group.
///
/// Runs that are empty, step backwards, or reach past either stream are
/// dropped with a warning, so a custom `SequenceDiffer` cannot produce
/// reversed or out-of-bounds ranges.
pub fn build_groups(
    runs: &[CommonRun],
    transcript_len: usize,
    asr_len: usize,
    trailing: TrailingGroups,
) -> Vec<DiffGroup> {
    let (cursor, mut groups) = runs.iter().fold(
        (Cursor::default(), Vec::with_capacity(runs.len() * 2 + 1)),
        |(cursor, mut groups), run| {
            if !run_fits(run, cursor, transcript_len, asr_len) {
                tracing::warn!(
                    len = run.len,
                    transcript_start = run.transcript_start,
                    asr_start = run.asr_start,
                    "grouping: dropping common run that is out of order or out of range"
                );
                return (cursor, groups);
            }
            groups.push(DiffGroup {
                matched: false,
                transcript: cursor.transcript..run.transcript_start,
                asr: cursor.asr..run.asr_start,
            });
            groups.push(DiffGroup {
                matched: true,
                transcript: run.transcript_start..run.transcript_end(),
                asr: run.asr_start..run.asr_end(),
            });
            let next = Cursor {
                transcript: run.transcript_end(),
                asr: run.asr_end(),
            };
            (next, groups)
        },
    );

    let has_tail = cursor.transcript < transcript_len || cursor.asr < asr_len;
    // No accepted run means no group was pushed by the fold.
    let close_tail = groups.is_empty() || trailing == TrailingGroups::Emit;
    if has_tail && close_tail {
        groups.push(DiffGroup {
            matched: false,
            transcript: cursor.transcript..transcript_len,
            asr: cursor.asr..asr_len,
        });
    } else if has_tail {
        tracing::debug!(
            unmatched_transcript = transcript_len - cursor.transcript,
            unmatched_asr = asr_len - cursor.asr,
            "grouping: tokens after the last common run are left ungrouped"
        );
    }

    groups
}

fn run_fits(run: &CommonRun, cursor: Cursor, transcript_len: usize, asr_len: usize) -> bool {
    let within = |start: usize, from: usize, len: usize| {
        start >= from
            && start
                .checked_add(run.len)
                .is_some_and(|end| end <= len)
    };
    run.len > 0
        && within(run.transcript_start, cursor.transcript, transcript_len)
        && within(run.asr_start, cursor.asr, asr_len)
}
