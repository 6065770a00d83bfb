// Library exports for stackduo-engine.
// Each report is computed twice: once by SQLite (`db`) and once by the
// in-memory pipeline (`pipeline`); `tasks` runs both and `compare` checks them.

pub mod compare;
pub mod db;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod tasks;

pub use compare::{DualResult, Mismatch};
pub use error::{EngineError, EngineResult};
pub use tasks::{
    answer_heavy_users, average_answers, linked_questions, run_task, top_commented_questions,
    top_locations, TaskReport,
};
