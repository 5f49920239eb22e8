use kanban_types::models::{Board, List, ListOrder, User};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::{DbError, OptionalExt, Result};
use crate::filter::LIVE_CARD;
use crate::{Database, ids};

impl Database {
    // -- Collaborator-owned entities --

    pub fn create_user(&self, username: &str) -> Result<User> {
        let id = ids::generate();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username) VALUES (?1, ?2)",
                params![id, username],
            )?;
            Ok(User {
                id,
                username: username.to_string(),
            })
        })
    }

    pub fn create_board(&self, title: &str) -> Result<Board> {
        let id = ids::generate();
        self.with_conn(|conn| {
            conn.execute("INSERT INTO boards (id, title) VALUES (?1, ?2)", params![id, title])?;
            Ok(Board {
                id,
                title: title.to_string(),
            })
        })
    }

    pub fn create_list(&self, board_id: &str, title: &str) -> Result<List> {
        let id = ids::generate();
        self.with_tx(|tx| {
            let exists = tx
                .query_row("SELECT 1 FROM boards WHERE id = ?1", [board_id], |_| Ok(()))
                .optional()?
                .is_some();
            if !exists {
                return Err(DbError::not_found("board", board_id));
            }

            tx.execute(
                "INSERT INTO lists (id, board_id, title) VALUES (?1, ?2, ?3)",
                params![id, board_id, title],
            )?;
            debug!("Created list {} on board {}", id, board_id);
            Ok(List {
                id,
                board_id: board_id.to_string(),
                title: title.to_string(),
            })
        })
    }

    // -- Ordering reads --

    /// The live ordering of a list, first card first.
    pub fn list_cards(&self, list_id: &str) -> Result<ListOrder> {
        self.with_conn(|conn| {
            board_of_list(conn, list_id)?;
            Ok(ListOrder {
                id: list_id.to_string(),
                cards: query_list_cards(conn, list_id)?,
            })
        })
    }
}

/// Board id owning `list_id`, or NotFound.
pub(crate) fn board_of_list(conn: &Connection, list_id: &str) -> Result<String> {
    conn.query_row("SELECT board_id FROM lists WHERE id = ?1", [list_id], |row| row.get(0))
        .optional()?
        .ok_or_else(|| DbError::not_found("list", list_id))
}

pub(crate) fn query_list_cards(conn: &Connection, list_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT cl.card_id
         FROM card_list cl
         JOIN cards c ON c.id = cl.card_id
         WHERE cl.list_id = ?1 AND {LIVE_CARD}
         ORDER BY cl.position"
    ))?;

    let rows = stmt
        .query_map([list_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture, insert_card};

    #[test]
    fn test_list_cards_in_position_order() {
        let f = fixture();
        insert_card(&f.db, "a", &f.list.id);
        insert_card(&f.db, "b", &f.list.id);
        insert_card(&f.db, "c", &f.other.id);

        let order = f.db.list_cards(&f.list.id).unwrap();
        assert_eq!(order, ListOrder::new(f.list.id.clone(), ["a", "b"]));
        assert_eq!(f.db.list_cards(&f.other.id).unwrap().cards, vec!["c"]);
    }

    #[test]
    fn test_list_cards_of_unknown_list() {
        let f = fixture();
        assert!(f.db.list_cards("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_list_requires_board() {
        let f = fixture();
        assert!(f.db.create_list("nope", "Later").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let f = fixture();
        assert!(f.db.create_user("ada").is_err());
    }
}
