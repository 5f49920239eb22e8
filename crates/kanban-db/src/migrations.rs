use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                username    TEXT NOT NULL UNIQUE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE boards (
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE lists (
                id          TEXT PRIMARY KEY,
                board_id    TEXT NOT NULL REFERENCES boards(id),
                title       TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            -- colors: bit n set = palette id n active
            -- deleted: unix millis, NULL while live
            CREATE TABLE cards (
                id          TEXT PRIMARY KEY,
                text        TEXT NOT NULL,
                colors      INTEGER NOT NULL DEFAULT 0,
                deleted     INTEGER,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            -- A card sits in at most one list; positions are dense per list.
            CREATE TABLE card_list (
                card_id     TEXT PRIMARY KEY REFERENCES cards(id),
                list_id     TEXT NOT NULL REFERENCES lists(id),
                position    INTEGER NOT NULL,
                UNIQUE(list_id, position)
            );

            CREATE TABLE comments (
                id          TEXT PRIMARY KEY,
                text        TEXT NOT NULL,
                created_at  INTEGER NOT NULL,
                deleted     INTEGER
            );

            CREATE TABLE comment_card (
                comment_id  TEXT PRIMARY KEY REFERENCES comments(id),
                card_id     TEXT NOT NULL REFERENCES cards(id)
            );

            CREATE INDEX idx_comment_card_card
                ON comment_card(card_id);

            CREATE TABLE comment_user (
                comment_id  TEXT PRIMARY KEY REFERENCES comments(id),
                user_id     TEXT NOT NULL REFERENCES users(id)
            );

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
