use std::fs;
use std::path::Path;

use askama::Template;
use asr_align_rs::{marked_segments, AlignmentReport, GroupReport, LineReport, ReportSummary};

struct SegmentView {
    text: String,
    marked: bool,
    kind: &'static str,
}

struct LineView<'a> {
    words_json: String,
    segments: Vec<SegmentView>,
    start: String,
    end: String,
    asr_words: &'a str,
}

#[derive(Template)]
#[template(path = "visualization.html")]
struct VisualizationTemplate<'a> {
    summary: &'a ReportSummary,
    groups: &'a [GroupReport],
    lines: Vec<LineView<'a>>,
}

pub fn render_visualization(report: &AlignmentReport) -> Result<String, String> {
    let lines = report
        .lines
        .iter()
        .map(line_view)
        .collect::<Result<Vec<_>, _>>()?;
    let template = VisualizationTemplate {
        summary: &report.summary,
        groups: &report.groups,
        lines,
    };
    template
        .render()
        .map_err(|err| format!("Failed to render visualization HTML: {err}"))
}

pub fn write_visualization(path: &Path, report: &AlignmentReport) -> Result<(), String> {
    let html = render_visualization(report)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create visualization output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    fs::write(path, html)
        .map_err(|err| format!("Failed to write visualization '{}': {err}", path.display()))
}

fn line_view(line: &LineReport) -> Result<LineView<'_>, String> {
    let words_json = serde_json::to_string(&line.spans)
        .map_err(|err| format!("Failed to serialize line words: {err}"))?;
    let segments = marked_segments(&line.text, &line.spans)
        .into_iter()
        .map(|segment| SegmentView {
            text: segment.text,
            marked: segment.kind.is_some(),
            kind: segment.kind.map(|kind| kind.as_str()).unwrap_or_default(),
        })
        .collect();
    Ok(LineView {
        words_json,
        segments,
        start: format_seconds(line.start),
        end: format_seconds(line.end),
        asr_words: &line.asr_words,
    })
}

fn format_seconds(value: Option<f64>) -> String {
    value
        .map(|seconds| format!("{seconds:.2}s"))
        .unwrap_or_else(|| "-".to_string())
}
