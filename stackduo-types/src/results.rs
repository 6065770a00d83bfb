use serde::{Deserialize, Serialize};

// Result rows serialize with the same PascalCase column names as the
// SQL projections, so a JSON report reads like the query output.

/// Task 1 row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

/// Task 2 row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinkedQuestion {
    pub title: Option<String>,
    pub num_links: i64,
}

/// Task 3 row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommentedQuestion {
    pub title: Option<String>,
    pub comment_count: i64,
    pub view_count: Option<i64>,
    pub comments_total_score: i64,
    pub display_name: String,
    pub reputation: i64,
    pub location: Option<String>,
}

/// Task 4 row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnswerHeavyUser {
    pub display_name: String,
    pub questions_number: i64,
    pub answers_number: i64,
    pub location: Option<String>,
    pub reputation: i64,
    pub up_votes: i64,
    pub down_votes: i64,
}

/// Task 5 row, already normalized for comparison: numeric columns widened
/// to `f64`, text trimmed and lower-cased, the `"none"` placeholder mapped
/// back to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AverageAnswers {
    pub account_id: f64,
    pub display_name: String,
    pub location: Option<String>,
    pub average_answers_count: f64,
}
