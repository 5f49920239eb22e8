//! Database row types. These map directly to SQLite rows.
//! Distinct from kanban-types API models to keep the DB layer independent.

use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct CardRow {
    pub id: String,
    pub text: String,
    pub colors: i64,
    pub deleted: Option<i64>,
}

/// A live card joined with the board its list belongs to.
#[derive(Debug)]
pub struct CardContextRow {
    pub id: String,
    pub text: String,
    pub board_id: String,
}

#[derive(Debug)]
pub struct MembershipRow {
    pub list_id: String,
    pub position: i64,
}

/// A live comment joined with its author.
#[derive(Debug)]
pub struct CommentRow {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub username: String,
}
