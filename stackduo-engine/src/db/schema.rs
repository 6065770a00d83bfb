/// SQL schema for the transient report database.
/// Column names follow the StackExchange data dump. No foreign keys: input
/// tables may reference rows that are not present.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS Users (
    Id INTEGER NOT NULL,
    DisplayName TEXT NOT NULL,
    Location TEXT,
    Reputation INTEGER NOT NULL DEFAULT 0,
    UpVotes INTEGER NOT NULL DEFAULT 0,
    DownVotes INTEGER NOT NULL DEFAULT 0,
    AccountId INTEGER
);

CREATE INDEX IF NOT EXISTS idx_users_id ON Users(Id);
CREATE INDEX IF NOT EXISTS idx_users_account_id ON Users(AccountId);

-- Posts table (questions, answers and anything else)
CREATE TABLE IF NOT EXISTS Posts (
    Id INTEGER NOT NULL,
    PostTypeId INTEGER NOT NULL,
    ParentId INTEGER,
    OwnerUserId INTEGER,
    Title TEXT,
    CommentCount INTEGER NOT NULL DEFAULT 0,
    ViewCount INTEGER
);

CREATE INDEX IF NOT EXISTS idx_posts_id ON Posts(Id);
CREATE INDEX IF NOT EXISTS idx_posts_owner_user_id ON Posts(OwnerUserId);
CREATE INDEX IF NOT EXISTS idx_posts_parent_id ON Posts(ParentId);

-- Comments table
CREATE TABLE IF NOT EXISTS Comments (
    Id INTEGER,
    PostId INTEGER NOT NULL,
    Score INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_comments_post_id ON Comments(PostId);

-- PostLinks table
CREATE TABLE IF NOT EXISTS PostLinks (
    Id INTEGER,
    PostId INTEGER NOT NULL,
    RelatedPostId INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_post_links_related_post_id ON PostLinks(RelatedPostId);
"#;
