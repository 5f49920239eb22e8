//! Soft-delete filter.
//!
//! Cards and comments are never physically removed; their `deleted` column
//! is set instead. Every read of either table goes through the predicates
//! below, with `c` aliasing `cards` and `m` aliasing `comments`.

use rusqlite::{Connection, params};

use crate::error::{DbError, OptionalExt, Result};
use crate::models::CardRow;

pub const LIVE_CARD: &str = "c.deleted IS NULL";
pub const LIVE_COMMENT: &str = "m.deleted IS NULL";

/// Value written to a `deleted` column.
pub fn tombstone() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fetch a live card, or NotFound if it is absent or soft-deleted.
pub(crate) fn live_card(conn: &Connection, card_id: &str) -> Result<CardRow> {
    conn.query_row(
        &format!("SELECT c.id, c.text, c.colors, c.deleted FROM cards c WHERE c.id = ?1 AND {LIVE_CARD}"),
        params![card_id],
        |row| {
            Ok(CardRow {
                id: row.get(0)?,
                text: row.get(1)?,
                colors: row.get(2)?,
                deleted: row.get(3)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| DbError::not_found("card", card_id))
}

/// Mark a live card deleted. NotFound if it was already gone.
pub(crate) fn bury_card(conn: &Connection, card_id: &str) -> Result<i64> {
    let at = tombstone();
    let affected = conn.execute(
        "UPDATE cards SET deleted = ?2 WHERE id = ?1 AND deleted IS NULL",
        params![card_id, at],
    )?;
    if affected == 0 {
        return Err(DbError::not_found("card", card_id));
    }
    Ok(at)
}

/// Mark a live comment deleted. NotFound if it was already gone.
pub(crate) fn bury_comment(conn: &Connection, comment_id: &str) -> Result<i64> {
    let at = tombstone();
    let affected = conn.execute(
        "UPDATE comments SET deleted = ?2 WHERE id = ?1 AND deleted IS NULL",
        params![comment_id, at],
    )?;
    if affected == 0 {
        return Err(DbError::not_found("comment", comment_id));
    }
    Ok(at)
}
