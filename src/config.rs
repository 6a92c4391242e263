use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AlignmentError;

/// What to do with tokens that follow the last common run of the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingGroups {
    /// Tail tokens belong to no group and stay unaligned.
    #[default]
    Omit,
    /// Close the sequence with one unmatched group covering both tails.
    Emit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    /// Minimum gap in seconds between two rows before a silence marker is inserted.
    pub silence_gap_secs: f64,
    pub trailing_groups: TrailingGroups,
}

impl AlignerConfig {
    pub const DEFAULT_SILENCE_GAP_SECS: f64 = 0.15;

    pub fn load(path: &Path) -> Result<Self, AlignmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AlignmentError::io("read aligner config", e))?;
        serde_json::from_str(&data).map_err(|e| AlignmentError::json("parse aligner config", e))
    }

    pub(crate) fn validate(&self) -> Result<(), AlignmentError> {
        if !self.silence_gap_secs.is_finite() || self.silence_gap_secs < 0.0 {
            return Err(AlignmentError::invalid_config(
                "silence_gap_secs",
                format!(
                    "must be a finite, non-negative number of seconds (got {})",
                    self.silence_gap_secs
                ),
            ));
        }
        Ok(())
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            silence_gap_secs: Self::DEFAULT_SILENCE_GAP_SECS,
            trailing_groups: TrailingGroups::Omit,
        }
    }
}
