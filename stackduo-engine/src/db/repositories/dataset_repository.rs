use anyhow::{Context, Result};
use rusqlite::Connection;

use stackduo_types::{Comment, Post, PostLink, User};

/// Bulk loader for the input tables
pub struct DatasetRepository<'a> {
    conn: &'a Connection,
}

impl<'a> DatasetRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert all users in a single transaction
    pub fn insert_users(&self, users: &[User]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO Users
                     (Id, DisplayName, Location, Reputation, UpVotes, DownVotes, AccountId)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )?;
            for user in users {
                stmt.execute((
                    user.id,
                    &user.display_name,
                    &user.location,
                    user.reputation,
                    user.up_votes,
                    user.down_votes,
                    user.account_id,
                ))
                .with_context(|| format!("Failed to insert user {}", user.id))?;
            }
        }
        tx.commit().context("Failed to commit users")?;
        Ok(users.len())
    }

    /// Insert all posts in a single transaction
    pub fn insert_posts(&self, posts: &[Post]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO Posts
                     (Id, PostTypeId, ParentId, OwnerUserId, Title, CommentCount, ViewCount)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )?;
            for post in posts {
                stmt.execute((
                    post.id,
                    post.post_type_id,
                    post.parent_id,
                    post.owner_user_id,
                    &post.title,
                    post.comment_count,
                    post.view_count,
                ))
                .with_context(|| format!("Failed to insert post {}", post.id))?;
            }
        }
        tx.commit().context("Failed to commit posts")?;
        Ok(posts.len())
    }

    /// Insert all comments in a single transaction
    pub fn insert_comments(&self, comments: &[Comment]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO Comments (Id, PostId, Score) VALUES (?, ?, ?)")?;
            for comment in comments {
                stmt.execute((comment.id, comment.post_id, comment.score))
                    .with_context(|| {
                        format!("Failed to insert comment on post {}", comment.post_id)
                    })?;
            }
        }
        tx.commit().context("Failed to commit comments")?;
        Ok(comments.len())
    }

    /// Insert all post links in a single transaction
    pub fn insert_post_links(&self, links: &[PostLink]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO PostLinks (Id, PostId, RelatedPostId) VALUES (?, ?, ?)",
            )?;
            for link in links {
                stmt.execute((link.id, link.post_id, link.related_post_id))
                    .with_context(|| {
                        format!(
                            "Failed to insert link {} -> {}",
                            link.post_id, link.related_post_id
                        )
                    })?;
            }
        }
        tx.commit().context("Failed to commit post links")?;
        Ok(links.len())
    }
}
