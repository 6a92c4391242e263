use std::fs;
use std::path::Path;

use asr_align_rs::{AlignmentReport, OutputRow};
use serde::Serialize;

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub transcript_path: String,
    pub asr_path: String,
    pub silence_gap_secs: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    schema_version: u32,
    meta: &'a Meta,
    report: &'a AlignmentReport,
    rows: &'a [OutputRow],
}

/// Serialize the report with its output rows. The document is fully rendered
/// before the file is touched, so a serialization failure leaves no partial file.
pub fn write_report(
    path: &Path,
    meta: &Meta,
    report: &AlignmentReport,
    rows: &[OutputRow],
) -> Result<(), String> {
    let document = JsonReport {
        schema_version: SCHEMA_VERSION,
        meta,
        report,
        rows,
    };
    let mut bytes = serde_json::to_vec_pretty(&document)
        .map_err(|err| format!("Failed to serialize alignment report: {err}"))?;
    bytes.push(b'\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create '{}': {err}", parent.display()))?;
    }
    fs::write(path, bytes).map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}
