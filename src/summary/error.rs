use thiserror::Error;

use crate::summary::schema::ReplyError;
use crate::summary::stages::PipelineStage;

/// Fatal errors of a summary run. Any of these aborts the run without a summary.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("{stage} stage: model call failed: {error:#}")]
    Provider {
        stage: PipelineStage,
        error: anyhow::Error,
    },

    #[error("{stage} stage: extraction failed: {source}")]
    Extraction {
        stage: PipelineStage,
        #[source]
        source: ReplyError,
    },

    #[error("pipeline state field `{0}` was already set")]
    FieldAlreadySet(&'static str),

    #[error("pipeline state field `{0}` was never set")]
    MissingField(&'static str),
}

impl SummaryError {
    /// Stage that produced the error, if any.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Provider { stage, .. } | Self::Extraction { stage, .. } => Some(*stage),
            Self::FieldAlreadySet(_) | Self::MissingField(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SummaryError>;
