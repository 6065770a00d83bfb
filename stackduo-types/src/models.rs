use serde::{Deserialize, Serialize};

/// A row of the `Users` table.
///
/// Field names serialize in PascalCase so dataset documents can reuse the
/// column names of the StackExchange data dump verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reputation: i64,
    #[serde(default)]
    pub up_votes: i64,
    #[serde(default)]
    pub down_votes: i64,
    /// Network-wide account id. Distinct from `id`.
    #[serde(default)]
    pub account_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Post {
    pub id: i64,
    /// 1 for questions, 2 for answers; see [`crate::PostType`]
    pub post_type_id: i64,
    /// Question this post answers (answers only)
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub owner_user_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub view_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Comment {
    #[serde(default)]
    pub id: Option<i64>,
    pub post_id: i64,
    #[serde(default)]
    pub score: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostLink {
    #[serde(default)]
    pub id: Option<i64>,
    pub post_id: i64,
    pub related_post_id: i64,
}

/// The four input tables, as loaded from a dataset document.
///
/// Any table missing from the document is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub post_links: Vec<PostLink>,
}

impl Dataset {
    /// Parse a dataset from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total number of rows across all four tables
    pub fn row_count(&self) -> usize {
        self.users.len() + self.posts.len() + self.comments.len() + self.post_links.len()
    }
}
