use kanban_types::api::{CreateCardRequest, UpdateCardRequest};
use kanban_types::models::{Card, CardPatch, Dropped};
use kanban_types::validate;
use rusqlite::{Connection, params};
use tracing::{debug, warn};

use crate::error::{DbError, OptionalExt, Result};
use crate::lists::board_of_list;
use crate::models::MembershipRow;
use crate::ordering::rewrite_list;
use crate::{Database, filter, ids};

/// Board-scoped path of a card.
pub fn card_link(board_id: &str, card_id: &str) -> String {
    format!("/b/{board_id}/c/{card_id}")
}

impl Database {
    /// Create a card at the end of `list_id`.
    pub fn create_card(&self, list_id: &str, req: &CreateCardRequest) -> Result<Card> {
        validate::create_card(req)?;

        let id = ids::generate();
        let board_id = self.with_tx(|tx| {
            let board_id = board_of_list(tx, list_id)?;

            tx.execute("INSERT INTO cards (id, text) VALUES (?1, ?2)", params![id, req.text])?;
            tx.execute(
                "INSERT INTO card_list (card_id, list_id, position)
                 SELECT ?1, ?2, COALESCE(MAX(position) + 1, 0) FROM card_list WHERE list_id = ?2",
                params![id, list_id],
            )?;

            Ok(board_id)
        })?;

        debug!("Created card {} in list {}", id, list_id);
        Ok(Card {
            link: card_link(&board_id, &id),
            id,
            text: req.text.clone(),
        })
    }

    /// Apply the recognized fields of `req`. Only the applied fields are echoed back.
    pub fn update_card(&self, card_id: &str, req: &UpdateCardRequest) -> Result<CardPatch> {
        validate::update_card(req)?;

        self.with_conn(|conn| {
            match &req.text {
                Some(text) => {
                    let affected = conn.execute(
                        "UPDATE cards SET text = ?2 WHERE id = ?1 AND deleted IS NULL",
                        params![card_id, text],
                    )?;
                    if affected == 0 {
                        warn!("Update of missing card {}", card_id);
                        return Err(DbError::not_found("card", card_id));
                    }
                }
                None => {
                    filter::live_card(conn, card_id)?;
                }
            }

            debug!("Updated card {}", card_id);
            Ok(CardPatch {
                id: card_id.to_string(),
                text: req.text.clone(),
            })
        })
    }

    /// Soft-delete a card and take it out of its list, closing the position gap.
    pub fn drop_card(&self, card_id: &str) -> Result<Dropped> {
        self.with_tx(|tx| {
            filter::bury_card(tx, card_id).inspect_err(|_| {
                warn!("Drop of missing card {}", card_id);
            })?;

            if let Some(membership) = membership_of(tx, card_id)? {
                let mut remaining = crate::lists::query_list_cards(tx, &membership.list_id)?;
                remaining.retain(|id| id != card_id);
                rewrite_list(tx, &membership.list_id, &remaining)?;
                debug!(
                    "Removed card {} from list {} at position {}",
                    card_id, membership.list_id, membership.position
                );
            }

            Ok(())
        })?;

        Ok(Dropped {
            id: card_id.to_string(),
        })
    }
}

fn membership_of(conn: &Connection, card_id: &str) -> Result<Option<MembershipRow>> {
    conn.query_row(
        "SELECT list_id, position FROM card_list WHERE card_id = ?1",
        [card_id],
        |row| {
            Ok(MembershipRow {
                list_id: row.get(0)?,
                position: row.get(1)?,
            })
        },
    )
    .optional()
}
