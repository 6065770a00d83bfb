//! The dataframe half of every report.
//!
//! Each function turns its input rows into polars frames and mirrors the
//! matching query in [`crate::db::repositories::ReportRepository`] as a lazy
//! plan: aggregate, join, filter, sort, limit. Sorts use the same secondary
//! keys as the SQL and put nulls first, as SQLite does, so ties resolve
//! identically.

pub mod frames;

use polars::prelude::*;

use stackduo_types::{
    AnswerHeavyUser, AverageAnswers, Comment, CommentedQuestion, LinkedQuestion, LocationCount,
    Post, PostLink, PostType, User,
};

use crate::normalize::{average_answers_row, round_half_even, MISSING_LOCATION};
use frames::{
    comments_frame, f64_column, i64_column, post_links_frame, posts_frame, required, str_column,
    users_frame,
};

const TOP_LOCATIONS_LIMIT: IdxSize = 10;
const TOP_COMMENTED_LIMIT: IdxSize = 10;
const ANSWER_HEAVY_LIMIT: IdxSize = 5;
const AVERAGE_ANSWERS_LIMIT: IdxSize = 10;

fn of_type(post_type: PostType) -> Expr {
    col("PostTypeId").eq(lit(post_type.id()))
}

/// `COUNT(*)` of a group as `Int64`
fn row_count(name: &str) -> Expr {
    len().cast(DataType::Int64).alias(name)
}

fn order(descending: impl IntoIterator<Item = bool>) -> SortMultipleOptions {
    SortMultipleOptions::default()
        .with_order_descending_multi(descending)
        .with_nulls_last(false)
        .with_maintain_order(true)
}

pub fn top_locations(users: &[User], posts: &[Post]) -> PolarsResult<Vec<LocationCount>> {
    let counts = users_frame(users)?
        .lazy()
        .inner_join(posts_frame(posts)?.lazy(), col("UserId"), col("OwnerUserId"))
        // Literal `!= ''`: whitespace-only locations stay, null ones compare as null.
        .filter(col("Location").neq(lit("")))
        .group_by_stable([col("Location")])
        .agg([row_count("Count")])
        .sort_by_exprs([col("Count"), col("Location")], order([true, false]))
        .limit(TOP_LOCATIONS_LIMIT)
        .collect()?;

    let locations = str_column(&counts, "Location")?;
    let totals = i64_column(&counts, "Count")?;
    (0..counts.height())
        .map(|i| {
            Ok(LocationCount {
                location: required(locations.get(i), "Location")?.to_string(),
                count: required(totals.get(i), "Count")?,
            })
        })
        .collect()
}

pub fn linked_questions(
    posts: &[Post],
    post_links: &[PostLink],
) -> PolarsResult<Vec<LinkedQuestion>> {
    let link_counts = post_links_frame(post_links)?
        .lazy()
        .group_by_stable([col("RelatedPostId")])
        .agg([row_count("NumLinks")]);

    let ranked = link_counts
        .inner_join(posts_frame(posts)?.lazy(), col("RelatedPostId"), col("PostId"))
        .filter(of_type(PostType::Question))
        .sort_by_exprs(
            [col("NumLinks"), col("Title"), col("RelatedPostId")],
            order([true, false, false]),
        )
        .collect()?;

    let titles = str_column(&ranked, "Title")?;
    let num_links = i64_column(&ranked, "NumLinks")?;
    (0..ranked.height())
        .map(|i| {
            Ok(LinkedQuestion {
                title: titles.get(i).map(str::to_string),
                num_links: required(num_links.get(i), "NumLinks")?,
            })
        })
        .collect()
}

/// Integer sums in polars wrap on overflow where SQLite raises an error.
/// Every partial sum lies between the total of the negative scores and the
/// total of the positive ones, so both fitting in `i64` rules overflow out.
fn check_score_total(comments: &[Comment]) -> PolarsResult<()> {
    let (mut positive, mut negative) = (0i64, 0i64);
    for score in comments.iter().map(|c| c.score) {
        let total = if score >= 0 { &mut positive } else { &mut negative };
        *total = total.checked_add(score).ok_or_else(|| {
            PolarsError::ComputeError("integer overflow summing comment scores".into())
        })?;
    }
    Ok(())
}

pub fn top_commented_questions(
    comments: &[Comment],
    posts: &[Post],
    users: &[User],
) -> PolarsResult<Vec<CommentedQuestion>> {
    check_score_total(comments)?;

    let scores = comments_frame(comments)?
        .lazy()
        .group_by_stable([col("CommentPostId")])
        .agg([col("Score").sum().alias("CommentsTotalScore")]);

    let ranked = posts_frame(posts)?
        .lazy()
        .filter(of_type(PostType::Question))
        .inner_join(scores, col("PostId"), col("CommentPostId"))
        .inner_join(users_frame(users)?.lazy(), col("OwnerUserId"), col("UserId"))
        .sort_by_exprs([col("CommentsTotalScore"), col("PostId")], order([true, false]))
        .limit(TOP_COMMENTED_LIMIT)
        .collect()?;

    let titles = str_column(&ranked, "Title")?;
    let comment_counts = i64_column(&ranked, "CommentCount")?;
    let view_counts = i64_column(&ranked, "ViewCount")?;
    let totals = i64_column(&ranked, "CommentsTotalScore")?;
    let names = str_column(&ranked, "DisplayName")?;
    let reputations = i64_column(&ranked, "Reputation")?;
    let locations = str_column(&ranked, "Location")?;

    (0..ranked.height())
        .map(|i| {
            Ok(CommentedQuestion {
                title: titles.get(i).map(str::to_string),
                comment_count: required(comment_counts.get(i), "CommentCount")?,
                view_count: view_counts.get(i),
                comments_total_score: required(totals.get(i), "CommentsTotalScore")?,
                display_name: required(names.get(i), "DisplayName")?.to_string(),
                reputation: required(reputations.get(i), "Reputation")?,
                location: locations.get(i).map(str::to_string),
            })
        })
        .collect()
}

pub fn answer_heavy_users(posts: &[Post], users: &[User]) -> PolarsResult<Vec<AnswerHeavyUser>> {
    let posts = posts_frame(posts)?.lazy();
    let owned_by_type = |post_type: PostType| {
        posts
            .clone()
            .filter(of_type(post_type).and(col("OwnerUserId").is_not_null()))
    };

    let answers = owned_by_type(PostType::Answer)
        .group_by_stable([col("OwnerUserId")])
        .agg([row_count("AnswersNumber")]);
    let questions = owned_by_type(PostType::Question)
        .group_by_stable([col("OwnerUserId")])
        .agg([row_count("QuestionsNumber")])
        .select([col("OwnerUserId").alias("QuestionOwnerId"), col("QuestionsNumber")]);

    let by_answers = order([true, false]);
    // Inner join: owners without a single question drop out here.
    let ranked = answers
        .inner_join(questions, col("OwnerUserId"), col("QuestionOwnerId"))
        .filter(col("AnswersNumber").gt(col("QuestionsNumber")))
        .sort_by_exprs([col("AnswersNumber"), col("OwnerUserId")], by_answers.clone())
        .limit(ANSWER_HEAVY_LIMIT)
        .inner_join(users_frame(users)?.lazy(), col("OwnerUserId"), col("UserId"))
        .sort_by_exprs([col("AnswersNumber"), col("OwnerUserId")], by_answers)
        .collect()?;

    let names = str_column(&ranked, "DisplayName")?;
    let questions_number = i64_column(&ranked, "QuestionsNumber")?;
    let answers_number = i64_column(&ranked, "AnswersNumber")?;
    let locations = str_column(&ranked, "Location")?;
    let reputations = i64_column(&ranked, "Reputation")?;
    let up_votes = i64_column(&ranked, "UpVotes")?;
    let down_votes = i64_column(&ranked, "DownVotes")?;

    (0..ranked.height())
        .map(|i| {
            Ok(AnswerHeavyUser {
                display_name: required(names.get(i), "DisplayName")?.to_string(),
                questions_number: required(questions_number.get(i), "QuestionsNumber")?,
                answers_number: required(answers_number.get(i), "AnswersNumber")?,
                location: locations.get(i).map(str::to_string),
                reputation: required(reputations.get(i), "Reputation")?,
                up_votes: required(up_votes.get(i), "UpVotes")?,
                down_votes: required(down_votes.get(i), "DownVotes")?,
            })
        })
        .collect()
}

/// Per-owner mean of answers per answered post, rounded half to even
fn owner_averages(posts: LazyFrame) -> PolarsResult<DataFrame> {
    let answer_counts = posts
        .clone()
        .filter(of_type(PostType::Answer).and(col("ParentId").is_not_null()))
        .group_by_stable([col("ParentId")])
        .agg([row_count("AnswerCount")])
        .select([col("ParentId").alias("AnsweredPostId"), col("AnswerCount")]);

    // Integer sum over row count, the same division SQLite's AVG performs.
    let mean = col("AnswerCount").sum().cast(DataType::Float64) / len().cast(DataType::Float64);
    let means = posts
        .select([col("PostId"), col("OwnerUserId")])
        .filter(col("OwnerUserId").is_not_null())
        .inner_join(answer_counts, col("PostId"), col("AnsweredPostId"))
        .group_by_stable([col("OwnerUserId")])
        .agg([mean.alias("AverageAnswersCount")])
        .collect()?;

    let owners = i64_column(&means, "OwnerUserId")?;
    let averages = f64_column(&means, "AverageAnswersCount")?;
    let mut owner_ids = Vec::with_capacity(means.height());
    let mut rounded = Vec::with_capacity(means.height());
    for i in 0..means.height() {
        owner_ids.push(required(owners.get(i), "OwnerUserId")?);
        rounded.push(round_half_even(
            required(averages.get(i), "AverageAnswersCount")?,
            1,
        ));
    }

    df!(
        "OwnerUserId" => owner_ids,
        "AverageAnswersCount" => rounded
    )
}

pub fn average_answers(posts: &[Post], users: &[User]) -> PolarsResult<Vec<AverageAnswers>> {
    let averages = owner_averages(posts_frame(posts)?.lazy())?;

    let ranked = users_frame(users)?
        .lazy()
        .filter(col("AccountId").is_not_null())
        .inner_join(averages.lazy(), col("AccountId"), col("OwnerUserId"))
        .with_column(col("Location").fill_null(lit(MISSING_LOCATION)))
        .sort_by_exprs(
            [col("AverageAnswersCount"), col("AccountId")],
            order([true, false]),
        )
        .limit(AVERAGE_ANSWERS_LIMIT)
        .collect()?;

    let account_ids = i64_column(&ranked, "AccountId")?;
    let names = str_column(&ranked, "DisplayName")?;
    let locations = str_column(&ranked, "Location")?;
    let averages = f64_column(&ranked, "AverageAnswersCount")?;

    (0..ranked.height())
        .map(|i| {
            Ok(average_answers_row(
                required(account_ids.get(i), "AccountId")?,
                required(names.get(i), "DisplayName")?,
                locations.get(i),
                required(averages.get(i), "AverageAnswersCount")?,
            ))
        })
        .collect()
}
