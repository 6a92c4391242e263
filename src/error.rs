use thiserror::Error;

/// Failures at the edges of the aligner: reading inputs, writing outputs and
/// checking configuration. Alignment itself is total and never fails.
#[derive(Debug, Error)]
pub enum AlignmentError {
    #[error("{context} failed: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{context} failed: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{context} failed: {source}")]
    Csv {
        context: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("invalid aligner config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl AlignmentError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn csv(context: &'static str, source: csv::Error) -> Self {
        Self::Csv { context, source }
    }

    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
