use crate::types::{Alignment, OutputRow, RowKind, TranscriptLine};

/// Round seconds to one decimal the way fixed-point rendering does, so the
/// stored value and its printed form always agree. Exact halfway values round
/// away from zero (`0.25` becomes `0.3`); everything else rounds on its exact
/// binary value (`1.15` is stored just below and becomes `1.1`).
pub fn round_tenths(seconds: f64) -> f64 {
    // The only binary values sitting exactly on a hundredths tie are odd quarters.
    let quarters = seconds * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (seconds * 10.0).round() / 10.0;
    }
    format!("{seconds:.1}").parse().unwrap_or(seconds)
}

/// Earliest start and latest end over the aligned tokens of a line, or `None`
/// when no token of the line was aligned.
pub fn line_window(line: &TranscriptLine, alignments: &[Option<Alignment>]) -> Option<(f64, f64)> {
    alignments[line.tokens.clone()]
        .iter()
        .flatten()
        .fold(None, |window, a| match window {
            None => Some((a.start, a.end)),
            Some((start, end)) => Some((f64::min(start, a.start), f64::max(end, a.end))),
        })
}

/// Build the timed output rows, inserting silence markers into gaps longer
/// than `silence_gap_secs`.
///
/// A line without any aligned token is emitted at the previous row's end time
/// as `RowKind::UnalignedLine` and does not move that end time.
pub fn assemble_rows(
    lines: &[TranscriptLine],
    alignments: &[Option<Alignment>],
    silence_gap_secs: f64,
) -> Vec<OutputRow> {
    let mut rows = Vec::with_capacity(lines.len() * 2 + 1);
    let mut last_end = 0.0;

    for (line_index, line) in lines.iter().enumerate() {
        let Some((start, end)) = line_window(line, alignments) else {
            tracing::debug!(line_index, "rows: line has no aligned tokens");
            rows.push(OutputRow {
                text: line.text.clone(),
                start_time: last_end,
                end_time: last_end,
                kind: RowKind::UnalignedLine,
            });
            continue;
        };

        let start = round_tenths(start);
        let end = round_tenths(end);
        if start - last_end > silence_gap_secs {
            rows.push(OutputRow::silence(last_end));
        }
        rows.push(OutputRow {
            text: line.text.clone(),
            start_time: start,
            end_time: end,
            kind: RowKind::Line,
        });
        last_end = end;
    }

    rows.push(OutputRow::silence(last_end));
    rows
}
