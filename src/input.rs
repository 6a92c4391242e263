use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::AlignmentError;
use crate::types::AsrSegment;

#[derive(Debug, Deserialize)]
struct AsrDocument {
    results: Vec<AsrResult>,
}

#[derive(Debug, Deserialize)]
struct AsrResult {
    start_time: f64,
    end_time: f64,
    #[serde(default)]
    alternatives: Vec<AsrAlternative>,
}

#[derive(Debug, Deserialize)]
struct AsrAlternative {
    #[serde(default)]
    content: String,
}

/// Read subtitle lines from a headerless TSV: the first column of each row is
/// one subtitle, and quoted cells may span several physical lines.
pub fn parse_transcript_tsv<R: Read>(reader: R) -> Result<Vec<String>, AlignmentError> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut lines = Vec::new();
    for record in tsv.records() {
        let record = record.map_err(|e| AlignmentError::csv("parse transcript TSV", e))?;
        lines.push(record.get(0).unwrap_or_default().to_string());
    }
    Ok(lines)
}

/// Read recognizer segments from a Speechmatics-style JSON document. Only the
/// first alternative of each result is used; results without one become
/// empty segments.
pub fn parse_asr_json<R: Read>(reader: R) -> Result<Vec<AsrSegment>, AlignmentError> {
    let document: AsrDocument = serde_json::from_reader(reader)
        .map_err(|e| AlignmentError::json("parse ASR result JSON", e))?;

    Ok(document
        .results
        .into_iter()
        .map(|result| AsrSegment {
            start_time: result.start_time,
            end_time: result.end_time,
            text: result
                .alternatives
                .into_iter()
                .next()
                .map(|alt| alt.content)
                .unwrap_or_default(),
        })
        .collect())
}

pub fn load_transcript(path: &Path) -> Result<Vec<String>, AlignmentError> {
    let file = File::open(path).map_err(|e| AlignmentError::io("open transcript TSV", e))?;
    parse_transcript_tsv(BufReader::new(file))
}

pub fn load_asr(path: &Path) -> Result<Vec<AsrSegment>, AlignmentError> {
    let file = File::open(path).map_err(|e| AlignmentError::io("open ASR result JSON", e))?;
    parse_asr_json(BufReader::new(file))
}
