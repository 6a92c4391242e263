use crate::types::{Alignment, AsrToken, DiffGroup};

/// Walk a group's ASR run at fractional position `t` in `[0, m)`, treating each
/// token's `[start, end]` as one unit. Returns the time and the global index of
/// the token containing `t`.
fn resolve_time(asr_run: &[AsrToken], t: f64) -> (f64, usize) {
    let idx = (t.floor() as usize).min(asr_run.len() - 1);
    let frac = t - idx as f64;
    let token = &asr_run[idx];
    (token.start + frac * (token.end - token.start), token.sequence_index)
}

/// Project a group's ASR timing onto its transcript tokens.
///
/// Returns `(transcript token index, alignment)` pairs. Groups without ASR
/// tokens carry no timing and yield nothing.
pub fn interpolate_group(group: &DiffGroup, asr_tokens: &[AsrToken]) -> Vec<(usize, Alignment)> {
    let asr_run = group.asr_run(asr_tokens);
    let k = group.transcript.len();
    if asr_run.is_empty() || k == 0 {
        return Vec::new();
    }

    let m = asr_run.len() as f64;
    let k = k as f64;
    group
        .transcript
        .clone()
        .enumerate()
        .map(|(i, token_index)| {
            let i = i as f64;
            let (start, asr_index) = resolve_time(asr_run, i * m / k);
            // Sample a quarter step ahead and scale by 4: the local slope of the
            // time curve, not the group's average word length.
            let (quarter, _) = resolve_time(asr_run, (i + 0.25) * m / k);
            let duration = (quarter - start) * 4.0;
            (
                token_index,
                Alignment {
                    start,
                    end: start + duration,
                    exact: group.matched,
                    asr_index,
                },
            )
        })
        .collect()
}

/// Alignment table for the whole transcript, indexed by token position.
pub fn interpolate(
    groups: &[DiffGroup],
    asr_tokens: &[AsrToken],
    transcript_len: usize,
) -> Vec<Option<Alignment>> {
    let mut alignments = vec![None; transcript_len];
    for group in groups {
        for (token_index, alignment) in interpolate_group(group, asr_tokens) {
            alignments[token_index] = Some(alignment);
        }
    }
    alignments
}
