use similar::{capture_diff_slices, Algorithm, DiffOp};

use crate::types::CommonRun;

/// Maximal common runs between the transcript and ASR word sequences, in
/// increasing index order on both sides.
///
/// Words are compared by exact string equality. Myers runs in O((T + A) * D)
/// where D is the edit distance.
pub fn common_runs<S: AsRef<str>>(transcript: &[S], asr: &[S]) -> Vec<CommonRun> {
    let transcript: Vec<&str> = transcript.iter().map(AsRef::as_ref).collect();
    let asr: Vec<&str> = asr.iter().map(AsRef::as_ref).collect();

    let mut runs: Vec<CommonRun> = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &transcript, &asr) {
        let DiffOp::Equal {
            old_index,
            new_index,
            len,
        } = op
        else {
            continue;
        };
        if len == 0 {
            continue;
        }
        // Equal ops that touch on both sides describe one run.
        if let Some(last) = runs.last_mut() {
            if last.transcript_end() == old_index && last.asr_end() == new_index {
                last.len += len;
                continue;
            }
        }
        runs.push(CommonRun {
            len,
            transcript_start: old_index,
            asr_start: new_index,
        });
    }

    tracing::debug!(
        transcript_len = transcript.len(),
        asr_len = asr.len(),
        run_count = runs.len(),
        "diff: collected common runs"
    );
    runs
}
