use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::alignment::rows::round_tenths;
use crate::error::AlignmentError;
use crate::types::OutputRow;

/// Write rows as `start_time<TAB>text`, start time with one decimal. Silence
/// markers have an empty text column.
pub fn write_rows<W: Write>(writer: W, rows: &[OutputRow]) -> Result<(), AlignmentError> {
    let mut tsv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in rows {
        let start = format!("{:.1}", round_tenths(row.start_time));
        tsv.write_record([start.as_str(), row.text.as_str()])
            .map_err(|e| AlignmentError::csv("write aligned TSV row", e))?;
    }
    tsv.flush()
        .map_err(|e| AlignmentError::io("flush aligned TSV", e))
}

pub fn write_rows_to_path(path: &Path, rows: &[OutputRow]) -> Result<(), AlignmentError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AlignmentError::io("create TSV output directory", e))?;
    }
    let file = File::create(path).map_err(|e| AlignmentError::io("create aligned TSV", e))?;
    write_rows(BufWriter::new(file), rows)
}
