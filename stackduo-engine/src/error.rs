use polars::prelude::PolarsError;
use thiserror::Error;

use crate::compare::Mismatch;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Query error: {0:#}")]
    Query(#[from] anyhow::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PolarsError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Mismatch(#[from] Mismatch),
}

pub type EngineResult<T> = Result<T, EngineError>;
