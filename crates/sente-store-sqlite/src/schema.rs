//! SQL schema for the Sente SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// One row per participant document. `body_json` carries the public
/// fields; `salt` and `pending` are columns so the confirmation guard and
/// the listing filter stay plain SQL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS participants (
    participant_id TEXT PRIMARY KEY,
    kind           TEXT NOT NULL DEFAULT 'participant',  -- document kind
    body_json      TEXT NOT NULL,      -- public participant fields
    salt           TEXT NOT NULL,      -- confirmation token
    pending        INTEGER NOT NULL,   -- 1 until confirmed, then 0
    created_at     TEXT NOT NULL       -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS participants_pending_idx ON participants(pending);

PRAGMA user_version = 1;
";
