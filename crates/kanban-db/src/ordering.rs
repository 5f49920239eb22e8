//! Full-replace reordering of card lists.
//!
//! A move is expressed as the final ordering of every list it touches. All
//! memberships of those lists are cleared first and then rewritten with
//! positions `0..n` in array order, inside one IMMEDIATE transaction, so no
//! reader ever sees a partially rewritten list.

use std::collections::HashSet;

use kanban_types::models::ListOrder;
use kanban_types::{ValidationErrors, validate};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::{OptionalExt, Result};
use crate::lists::{board_of_list, query_list_cards};
use crate::{Database, filter};

impl Database {
    /// Replace the orderings of `source` and `target` atomically and echo
    /// them back. Passing the same list id twice rewrites that list once,
    /// using `target.cards` as its final order.
    pub fn move_cards(&self, source: ListOrder, target: ListOrder) -> Result<[ListOrder; 2]> {
        validate::move_cards(&source, &target)?;

        self.with_tx(|tx| {
            let finals: Vec<&ListOrder> = if source.id == target.id {
                vec![&target]
            } else {
                vec![&source, &target]
            };

            check_move(tx, &finals)?;

            for list in &finals {
                let cleared = clear_list(tx, &list.id)?;
                debug!("Cleared {} memberships of list {}", cleared, list.id);
            }
            for list in &finals {
                write_list(tx, &list.id, &list.cards)?;
            }

            Ok(())
        })?;

        debug!(
            "Moved cards: list {} -> {:?}, list {} -> {:?}",
            source.id, source.cards, target.id, target.cards
        );
        Ok([source, target])
    }
}

/// Every list must exist, every named card must be live and sit in one of
/// these lists, and every live card currently in them must still appear.
fn check_move(conn: &Connection, finals: &[&ListOrder]) -> Result<()> {
    let mut current = Vec::new();
    for list in finals {
        board_of_list(conn, &list.id)?;
        current.extend(query_list_cards(conn, &list.id)?);
    }

    let named: HashSet<&str> = finals
        .iter()
        .flat_map(|list| list.cards.iter().map(String::as_str))
        .collect();
    for card_id in &named {
        filter::live_card(conn, card_id)?;
    }

    let touched: HashSet<&str> = finals.iter().map(|list| list.id.as_str()).collect();
    let mut errors = ValidationErrors::new();
    for card_id in &named {
        if let Some(other) = list_of_card(conn, card_id)? {
            if !touched.contains(other.as_str()) {
                errors.push("cards", format!("card {card_id} belongs to list {other}"));
            }
        }
    }
    for card_id in current.iter().filter(|id| !named.contains(id.as_str())) {
        errors.push("cards", format!("card {card_id} would be left without a list"));
    }
    Ok(errors.into_result()?)
}

fn list_of_card(conn: &Connection, card_id: &str) -> Result<Option<String>> {
    conn.query_row("SELECT list_id FROM card_list WHERE card_id = ?1", [card_id], |row| row.get(0))
        .optional()
}

/// Delete every membership of a list. Returns the number removed.
pub(crate) fn clear_list(conn: &Connection, list_id: &str) -> Result<usize> {
    Ok(conn.execute("DELETE FROM card_list WHERE list_id = ?1", [list_id])?)
}

/// Insert memberships for `cards` at positions `0..n`. The list must be clear.
pub(crate) fn write_list(conn: &Connection, list_id: &str, cards: &[String]) -> Result<()> {
    let mut stmt =
        conn.prepare("INSERT INTO card_list (card_id, list_id, position) VALUES (?1, ?2, ?3)")?;
    for (position, card_id) in cards.iter().enumerate() {
        stmt.execute(params![card_id, list_id, position as i64])?;
    }
    Ok(())
}

/// Clear and rewrite a single list.
pub(crate) fn rewrite_list(conn: &Connection, list_id: &str, cards: &[String]) -> Result<()> {
    clear_list(conn, list_id)?;
    write_list(conn, list_id, cards)
}
