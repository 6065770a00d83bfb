use std::fmt::Debug;

use serde::Serialize;
use thiserror::Error;

use stackduo_types::Task;

/// Both computations of one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualResult<R> {
    pub sql: Vec<R>,
    pub pipeline: Vec<R>,
}

/// First difference found between the two paths of a report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Mismatch {
    #[error("{task}: SQL returned {sql} rows, pipeline returned {pipeline}")]
    RowCount {
        task: Task,
        sql: usize,
        pipeline: usize,
    },

    #[error("{task}: row {index} differs: sql={sql} pipeline={pipeline}")]
    Row {
        task: Task,
        index: usize,
        sql: String,
        pipeline: String,
    },
}

impl<R> DualResult<R> {
    pub fn new(sql: Vec<R>, pipeline: Vec<R>) -> Self {
        Self { sql, pipeline }
    }
}

impl<R: PartialEq + Debug> DualResult<R> {
    /// Compare the two tables row by row
    pub fn verify(&self, task: Task) -> Result<(), Mismatch> {
        if self.sql.len() != self.pipeline.len() {
            return Err(Mismatch::RowCount {
                task,
                sql: self.sql.len(),
                pipeline: self.pipeline.len(),
            });
        }

        match self
            .sql
            .iter()
            .zip(&self.pipeline)
            .position(|(sql, pipeline)| sql != pipeline)
        {
            Some(index) => Err(Mismatch::Row {
                task,
                index,
                sql: format!("{:?}", self.sql[index]),
                pipeline: format!("{:?}", self.pipeline[index]),
            }),
            None => Ok(()),
        }
    }
}
