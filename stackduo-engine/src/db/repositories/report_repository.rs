use anyhow::{Context, Result};
use rusqlite::Connection;

use stackduo_types::{
    AnswerHeavyUser, AverageAnswers, CommentedQuestion, LinkedQuestion, LocationCount, PostType,
};

use crate::normalize::average_answers_row;

/// The SQL half of every report.
///
/// Queries assume the tables they read were loaded through
/// [`super::DatasetRepository`]. Secondary sort keys after the documented
/// ones exist only to make ties deterministic; the pipeline uses the same.
pub struct ReportRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ReportRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Ten most common non-empty owner locations, by number of posts
    pub fn top_locations(&self) -> Result<Vec<LocationCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.Location, COUNT(*) AS Count
             FROM Users u
             JOIN Posts p ON u.Id = p.OwnerUserId
             WHERE u.Location != ''
             GROUP BY u.Location
             ORDER BY Count DESC, u.Location ASC
             LIMIT 10",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(LocationCount {
                    location: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read top locations")?;

        Ok(rows)
    }

    /// Every question that is the target of at least one link
    pub fn linked_questions(&self) -> Result<Vec<LinkedQuestion>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.Title, r.NumLinks
             FROM (
                 SELECT RelatedPostId, COUNT(*) AS NumLinks
                 FROM PostLinks
                 GROUP BY RelatedPostId
             ) AS r
             JOIN Posts p ON r.RelatedPostId = p.Id
             WHERE p.PostTypeId = ?
             ORDER BY r.NumLinks DESC, p.Title ASC, p.Id ASC",
        )?;

        let rows = stmt
            .query_map([PostType::Question.id()], |row| {
                Ok(LinkedQuestion {
                    title: row.get(0)?,
                    num_links: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read linked questions")?;

        Ok(rows)
    }

    /// Ten questions with the highest summed comment score
    pub fn top_commented_questions(&self) -> Result<Vec<CommentedQuestion>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.Title, p.CommentCount, p.ViewCount, c.CommentsTotalScore,
                    u.DisplayName, u.Reputation, u.Location
             FROM (
                 SELECT PostId, SUM(Score) AS CommentsTotalScore
                 FROM Comments
                 GROUP BY PostId
             ) AS c
             JOIN Posts p ON p.Id = c.PostId
             JOIN Users u ON u.Id = p.OwnerUserId
             WHERE p.PostTypeId = ?
             ORDER BY c.CommentsTotalScore DESC, p.Id ASC
             LIMIT 10",
        )?;

        let rows = stmt
            .query_map([PostType::Question.id()], |row| {
                Ok(CommentedQuestion {
                    title: row.get(0)?,
                    comment_count: row.get(1)?,
                    view_count: row.get(2)?,
                    comments_total_score: row.get(3)?,
                    display_name: row.get(4)?,
                    reputation: row.get(5)?,
                    location: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read top commented questions")?;

        Ok(rows)
    }

    /// Five users with the most answers among those who answer more than
    /// they ask. Users who never asked are absent from the questions side of
    /// the join and therefore never listed.
    pub fn answer_heavy_users(&self) -> Result<Vec<AnswerHeavyUser>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.DisplayName, ranked.QuestionsNumber, ranked.AnswersNumber,
                    u.Location, u.Reputation, u.UpVotes, u.DownVotes
             FROM (
                 SELECT a.OwnerUserId, a.AnswersNumber, q.QuestionsNumber
                 FROM (
                     SELECT OwnerUserId, COUNT(*) AS AnswersNumber
                     FROM Posts
                     WHERE PostTypeId = ?1
                     GROUP BY OwnerUserId
                 ) AS a
                 JOIN (
                     SELECT OwnerUserId, COUNT(*) AS QuestionsNumber
                     FROM Posts
                     WHERE PostTypeId = ?2
                     GROUP BY OwnerUserId
                 ) AS q ON a.OwnerUserId = q.OwnerUserId
                 WHERE a.AnswersNumber > q.QuestionsNumber
                 ORDER BY a.AnswersNumber DESC, a.OwnerUserId ASC
                 LIMIT 5
             ) AS ranked
             JOIN Users u ON u.Id = ranked.OwnerUserId
             ORDER BY ranked.AnswersNumber DESC, ranked.OwnerUserId ASC",
        )?;

        let rows = stmt
            .query_map([PostType::Answer.id(), PostType::Question.id()], |row| {
                Ok(AnswerHeavyUser {
                    display_name: row.get(0)?,
                    questions_number: row.get(1)?,
                    answers_number: row.get(2)?,
                    location: row.get(3)?,
                    reputation: row.get(4)?,
                    up_votes: row.get(5)?,
                    down_votes: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read answer-heavy users")?;

        Ok(rows)
    }

    /// Ten accounts with the highest mean answer count per owned post that
    /// received answers. Owners are matched on `Users.AccountId`.
    pub fn average_answers(&self) -> Result<Vec<AverageAnswers>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.AccountId, u.DisplayName, u.Location, per_owner.AverageAnswersCount
             FROM (
                 SELECT p.OwnerUserId,
                        round_half_even(AVG(ac.AnswersCount), 1) AS AverageAnswersCount
                 FROM (
                     SELECT ParentId, COUNT(*) AS AnswersCount
                     FROM Posts
                     WHERE PostTypeId = ?
                     GROUP BY ParentId
                 ) AS ac
                 JOIN Posts p ON p.Id = ac.ParentId
                 GROUP BY p.OwnerUserId
             ) AS per_owner
             JOIN Users u ON u.AccountId = per_owner.OwnerUserId
             ORDER BY per_owner.AverageAnswersCount DESC, u.AccountId ASC
             LIMIT 10",
        )?;

        let rows = stmt
            .query_map([PostType::Answer.id()], |row| {
                let account_id: i64 = row.get(0)?;
                let display_name: String = row.get(1)?;
                let location: Option<String> = row.get(2)?;
                let average: f64 = row.get(3)?;
                Ok(average_answers_row(
                    account_id,
                    &display_name,
                    location.as_deref(),
                    average,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read average answers")?;

        Ok(rows)
    }
}
