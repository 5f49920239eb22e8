use kanban_types::api::CreateCommentRequest;
use kanban_types::models::{Author, Comment, Dropped};
use kanban_types::validate;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{Row, params};
use tracing::debug;

use crate::error::{DbError, OptionalExt, Result};
use crate::{Database, filter, ids};

/// Read a unix-millis column as a UTC timestamp.
pub(crate) fn millis_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp {millis} out of range").into(),
        )
    })
}

impl Database {
    /// Attach a comment by `req.user_id` to a live card.
    pub fn create_comment(&self, card_id: &str, req: &CreateCommentRequest) -> Result<Comment> {
        validate::create_comment(req)?;

        let id = ids::generate();
        // Stored at millisecond precision; return exactly what reads will see.
        let created_at = Utc::now().trunc_subsecs(3);

        let username = self.with_tx(|tx| {
            filter::live_card(tx, card_id)?;
            let username: String = tx
                .query_row("SELECT username FROM users WHERE id = ?1", [&req.user_id], |row| {
                    row.get(0)
                })
                .optional()?
                .ok_or_else(|| DbError::not_found("user", &req.user_id))?;

            tx.execute(
                "INSERT INTO comments (id, text, created_at) VALUES (?1, ?2, ?3)",
                params![id, req.text, created_at.timestamp_millis()],
            )?;
            tx.execute(
                "INSERT INTO comment_card (comment_id, card_id) VALUES (?1, ?2)",
                params![id, card_id],
            )?;
            tx.execute(
                "INSERT INTO comment_user (comment_id, user_id) VALUES (?1, ?2)",
                params![id, req.user_id],
            )?;

            Ok(username)
        })?;

        debug!("Created comment {} on card {}", id, card_id);
        Ok(Comment {
            id,
            text: req.text.clone(),
            created_at,
            user: Author {
                id: req.user_id.clone(),
                username,
            },
        })
    }

    pub fn drop_comment(&self, comment_id: &str) -> Result<Dropped> {
        self.with_conn(|conn| filter::bury_comment(conn, comment_id))?;
        debug!("Dropped comment {}", comment_id);
        Ok(Dropped {
            id: comment_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture, insert_card};

    fn comment(user_id: &str, text: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            user_id: user_id.into(),
            text: text.into(),
        }
    }

    #[test]
    fn test_create_comment_returns_author() {
        let f = fixture();
        insert_card(&f.db, "c1", &f.list.id);

        let created = f.db.create_comment("c1", &comment(&f.user.id, "Looks good")).unwrap();
        assert_eq!(created.text, "Looks good");
        assert_eq!(created.user, Author { id: f.user.id.clone(), username: "ada".into() });
        assert!(created.created_at.timestamp() > 0);
    }

    #[test]
    fn test_created_at_matches_stored_value() {
        let f = fixture();
        insert_card(&f.db, "c1", &f.list.id);

        let created = f.db.create_comment("c1", &comment(&f.user.id, "Noted")).unwrap();
        assert_eq!(created.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(f.db.find_card("c1").unwrap().comments[0].created_at, created.created_at);
    }

    #[test]
    fn test_comment_requires_live_card_and_user() {
        let f = fixture();
        insert_card(&f.db, "c1", &f.list.id);

        let err = f.db.create_comment("c1", &comment("ghost", "Hi")).unwrap_err();
        assert!(matches!(err, DbError::NotFound { entity: "user", .. }));

        f.db.drop_card("c1").unwrap();
        let err = f.db.create_comment("c1", &comment(&f.user.id, "Hi")).unwrap_err();
        assert!(matches!(err, DbError::NotFound { entity: "card", .. }));
    }

    #[test]
    fn test_drop_comment() {
        let f = fixture();
        insert_card(&f.db, "c1", &f.list.id);
        let created = f.db.create_comment("c1", &comment(&f.user.id, "Typo")).unwrap();

        assert_eq!(f.db.drop_comment(&created.id).unwrap().id, created.id);
        assert!(f.db.drop_comment(&created.id).unwrap_err().is_not_found());
    }
}
