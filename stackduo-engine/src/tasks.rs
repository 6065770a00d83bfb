use std::fmt::Debug;
use std::time::Instant;

use polars::prelude::PolarsResult;
use serde::Serialize;
use tracing::{debug, info, warn};

use stackduo_types::{
    AnswerHeavyUser, AverageAnswers, Comment, CommentedQuestion, Dataset, LinkedQuestion,
    LocationCount, Post, PostLink, Task, User,
};

use crate::compare::DualResult;
use crate::db::repositories::{DatasetRepository, ReportRepository};
use crate::db::Database;
use crate::error::EngineResult;
use crate::pipeline;

/// Outcome of one report, ready to print or serialize
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub task: Task,
    pub rows: usize,
    pub agrees: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<String>,
    pub sql: serde_json::Value,
    pub pipeline: serde_json::Value,
}

/// Run the SQL path of `task` in a database of its own
fn run_sql<R>(
    task: Task,
    load: impl FnOnce(&DatasetRepository<'_>) -> anyhow::Result<()>,
    query: impl FnOnce(&ReportRepository<'_>) -> anyhow::Result<Vec<R>>,
) -> EngineResult<Vec<R>> {
    let started = Instant::now();
    let db = Database::open()?;
    load(&DatasetRepository::new(db.connection()))?;
    let rows = query(&ReportRepository::new(db.connection()))?;
    debug!(
        task = %task,
        rows = rows.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "SQL path finished"
    );
    Ok(rows)
}

/// Run the dataframe path of `task`
fn run_pipeline<R>(
    task: Task,
    compute: impl FnOnce() -> PolarsResult<Vec<R>>,
) -> EngineResult<Vec<R>> {
    let started = Instant::now();
    let rows = compute()?;
    debug!(
        task = %task,
        rows = rows.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "pipeline path finished"
    );
    Ok(rows)
}

/// Task 1: top ten locations by number of posts
pub fn top_locations(users: &[User], posts: &[Post]) -> EngineResult<DualResult<LocationCount>> {
    let task = Task::TopLocations;
    let sql = run_sql(
        task,
        |repo| {
            repo.insert_users(users)?;
            repo.insert_posts(posts)?;
            Ok(())
        },
        |repo| repo.top_locations(),
    )?;
    let pipeline = run_pipeline(task, || pipeline::top_locations(users, posts))?;
    Ok(DualResult::new(sql, pipeline))
}

/// Task 2: questions ranked by inbound links
pub fn linked_questions(
    posts: &[Post],
    post_links: &[PostLink],
) -> EngineResult<DualResult<LinkedQuestion>> {
    let task = Task::LinkedQuestions;
    let sql = run_sql(
        task,
        |repo| {
            repo.insert_posts(posts)?;
            repo.insert_post_links(post_links)?;
            Ok(())
        },
        |repo| repo.linked_questions(),
    )?;
    let pipeline = run_pipeline(task, || pipeline::linked_questions(posts, post_links))?;
    Ok(DualResult::new(sql, pipeline))
}

/// Task 3: top ten questions by summed comment score
pub fn top_commented_questions(
    comments: &[Comment],
    posts: &[Post],
    users: &[User],
) -> EngineResult<DualResult<CommentedQuestion>> {
    let task = Task::TopCommentedQuestions;
    let sql = run_sql(
        task,
        |repo| {
            repo.insert_users(users)?;
            repo.insert_posts(posts)?;
            repo.insert_comments(comments)?;
            Ok(())
        },
        |repo| repo.top_commented_questions(),
    )?;
    let pipeline = run_pipeline(task, || {
        pipeline::top_commented_questions(comments, posts, users)
    })?;
    Ok(DualResult::new(sql, pipeline))
}

/// Task 4: top five users with more answers than questions
pub fn answer_heavy_users(
    posts: &[Post],
    users: &[User],
) -> EngineResult<DualResult<AnswerHeavyUser>> {
    let task = Task::AnswerHeavyUsers;
    let sql = run_sql(
        task,
        |repo| {
            repo.insert_users(users)?;
            repo.insert_posts(posts)?;
            Ok(())
        },
        |repo| repo.answer_heavy_users(),
    )?;
    let pipeline = run_pipeline(task, || pipeline::answer_heavy_users(posts, users))?;
    Ok(DualResult::new(sql, pipeline))
}

/// Task 5: top ten accounts by mean answers per answered post
pub fn average_answers(posts: &[Post], users: &[User]) -> EngineResult<DualResult<AverageAnswers>> {
    let task = Task::AverageAnswers;
    let sql = run_sql(
        task,
        |repo| {
            repo.insert_users(users)?;
            repo.insert_posts(posts)?;
            Ok(())
        },
        |repo| repo.average_answers(),
    )?;
    let pipeline = run_pipeline(task, || pipeline::average_answers(posts, users))?;
    Ok(DualResult::new(sql, pipeline))
}

fn report<R>(task: Task, result: DualResult<R>) -> EngineResult<TaskReport>
where
    R: PartialEq + Debug + Serialize,
{
    let mismatch = result.verify(task).err();
    match &mismatch {
        Some(mismatch) => warn!(task = %task, "paths disagree: {}", mismatch),
        None => info!(task = %task, rows = result.sql.len(), "paths agree"),
    }

    Ok(TaskReport {
        task,
        rows: result.sql.len(),
        agrees: mismatch.is_none(),
        mismatch: mismatch.map(|m| m.to_string()),
        sql: serde_json::to_value(&result.sql)?,
        pipeline: serde_json::to_value(&result.pipeline)?,
    })
}

/// Run one report over a dataset and compare its two paths.
///
/// Disagreement is recorded in the report, not returned as an error.
pub fn run_task(task: Task, dataset: &Dataset) -> EngineResult<TaskReport> {
    let Dataset {
        users,
        posts,
        comments,
        post_links,
    } = dataset;

    match task {
        Task::TopLocations => report(task, top_locations(users, posts)?),
        Task::LinkedQuestions => report(task, linked_questions(posts, post_links)?),
        Task::TopCommentedQuestions => {
            report(task, top_commented_questions(comments, posts, users)?)
        }
        Task::AnswerHeavyUsers => report(task, answer_heavy_users(posts, users)?),
        Task::AverageAnswers => report(task, average_answers(posts, users)?),
    }
}
