//! Card detail view: card -> list -> board -> comments -> authors.
//!
//! A soft-deleted card is reported exactly like a card that never existed.
//! Soft-deleted comments are skipped; every comment returned has an author.

use kanban_types::models::{Author, CardDetail, Comment};
use rusqlite::Connection;

use crate::cards::card_link;
use crate::comments::millis_at;
use crate::error::{DbError, OptionalExt, Result};
use crate::filter::{LIVE_CARD, LIVE_COMMENT};
use crate::models::{CardContextRow, CommentRow};
use crate::Database;

impl Database {
    pub fn find_card(&self, card_id: &str) -> Result<CardDetail> {
        self.with_conn(|conn| assemble(conn, card_id))
    }
}

fn assemble(conn: &Connection, card_id: &str) -> Result<CardDetail> {
    let card = query_card_context(conn, card_id)?
        .ok_or_else(|| DbError::not_found("card", card_id))?;
    let comments = query_comments(conn, &card.id)?;

    Ok(CardDetail {
        link: card_link(&card.board_id, &card.id),
        id: card.id,
        text: card.text,
        board_id: card.board_id,
        comments: comments
            .into_iter()
            .map(|row| Comment {
                id: row.id,
                text: row.text,
                created_at: row.created_at,
                user: Author {
                    id: row.user_id,
                    username: row.username,
                },
            })
            .collect(),
    })
}

fn query_card_context(conn: &Connection, card_id: &str) -> Result<Option<CardContextRow>> {
    conn.query_row(
        &format!(
            "SELECT c.id, c.text, l.board_id
             FROM cards c
             JOIN card_list cl ON cl.card_id = c.id
             JOIN lists l ON l.id = cl.list_id
             WHERE c.id = ?1 AND {LIVE_CARD}"
        ),
        [card_id],
        |row| {
            Ok(CardContextRow {
                id: row.get(0)?,
                text: row.get(1)?,
                board_id: row.get(2)?,
            })
        },
    )
    .optional()
}

fn query_comments(conn: &Connection, card_id: &str) -> Result<Vec<CommentRow>> {
    // Inner joins drop any comment whose author row is missing.
    let mut stmt = conn.prepare(&format!(
        "SELECT m.id, m.text, m.created_at, u.id, u.username
         FROM comment_card cc
         JOIN comments m ON m.id = cc.comment_id
         JOIN comment_user cu ON cu.comment_id = m.id
         JOIN users u ON u.id = cu.user_id
         WHERE cc.card_id = ?1 AND {LIVE_COMMENT}
         ORDER BY m.created_at, m.rowid"
    ))?;

    let rows = stmt
        .query_map([card_id], |row| {
            Ok(CommentRow {
                id: row.get(0)?,
                text: row.get(1)?,
                created_at: millis_at(row, 2)?,
                user_id: row.get(3)?,
                username: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
