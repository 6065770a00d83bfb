//! Conversions between the typed input/result rows and polars frames.
//!
//! Every column name is unique across the four tables (`PostId`,
//! `CommentPostId`, `RelatedPostId`, ...) so joins never need suffixes.

use polars::prelude::*;

use stackduo_types::{Comment, Post, PostLink, User};

pub fn users_frame(users: &[User]) -> PolarsResult<DataFrame> {
    df!(
        "UserId" => users.iter().map(|u| u.id).collect::<Vec<i64>>(),
        "DisplayName" => users.iter().map(|u| u.display_name.as_str()).collect::<Vec<&str>>(),
        "Location" => users.iter().map(|u| u.location.as_deref()).collect::<Vec<Option<&str>>>(),
        "Reputation" => users.iter().map(|u| u.reputation).collect::<Vec<i64>>(),
        "UpVotes" => users.iter().map(|u| u.up_votes).collect::<Vec<i64>>(),
        "DownVotes" => users.iter().map(|u| u.down_votes).collect::<Vec<i64>>(),
        "AccountId" => users.iter().map(|u| u.account_id).collect::<Vec<Option<i64>>>()
    )
}

pub fn posts_frame(posts: &[Post]) -> PolarsResult<DataFrame> {
    df!(
        "PostId" => posts.iter().map(|p| p.id).collect::<Vec<i64>>(),
        "PostTypeId" => posts.iter().map(|p| p.post_type_id).collect::<Vec<i64>>(),
        "ParentId" => posts.iter().map(|p| p.parent_id).collect::<Vec<Option<i64>>>(),
        "OwnerUserId" => posts.iter().map(|p| p.owner_user_id).collect::<Vec<Option<i64>>>(),
        "Title" => posts.iter().map(|p| p.title.as_deref()).collect::<Vec<Option<&str>>>(),
        "CommentCount" => posts.iter().map(|p| p.comment_count).collect::<Vec<i64>>(),
        "ViewCount" => posts.iter().map(|p| p.view_count).collect::<Vec<Option<i64>>>()
    )
}

pub fn comments_frame(comments: &[Comment]) -> PolarsResult<DataFrame> {
    df!(
        "CommentPostId" => comments.iter().map(|c| c.post_id).collect::<Vec<i64>>(),
        "Score" => comments.iter().map(|c| c.score).collect::<Vec<i64>>()
    )
}

pub fn post_links_frame(links: &[PostLink]) -> PolarsResult<DataFrame> {
    df!(
        "LinkPostId" => links.iter().map(|l| l.post_id).collect::<Vec<i64>>(),
        "RelatedPostId" => links.iter().map(|l| l.related_post_id).collect::<Vec<i64>>()
    )
}

pub fn i64_column<'a>(df: &'a DataFrame, name: &str) -> PolarsResult<&'a Int64Chunked> {
    df.column(name)?.as_materialized_series().i64()
}

pub fn f64_column<'a>(df: &'a DataFrame, name: &str) -> PolarsResult<&'a Float64Chunked> {
    df.column(name)?.as_materialized_series().f64()
}

pub fn str_column<'a>(df: &'a DataFrame, name: &str) -> PolarsResult<&'a StringChunked> {
    df.column(name)?.as_materialized_series().str()
}

/// A value from a column the plan guarantees to be non-null
pub fn required<T>(value: Option<T>, column: &str) -> PolarsResult<T> {
    value.ok_or_else(|| PolarsError::ComputeError(format!("unexpected null in {}", column).into()))
}
