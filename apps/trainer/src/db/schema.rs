//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local SQLite database.
pub const SCHEMA: &str = r#"
-- Leitner review state, one row per reviewed item
CREATE TABLE IF NOT EXISTS review_records (
    item_id TEXT PRIMARY KEY,
    box INTEGER NOT NULL CHECK (box BETWEEN 1 AND 5),
    last_reviewed_at TEXT NOT NULL,
    next_due_at TEXT NOT NULL,
    success_streak INTEGER NOT NULL DEFAULT 0
);

-- User settings (JSON payload)
CREATE TABLE IF NOT EXISTS user_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    payload TEXT NOT NULL DEFAULT '{}'
);

-- Progress counters
CREATE TABLE IF NOT EXISTS progress (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    streak INTEGER NOT NULL DEFAULT 0,
    words_learned INTEGER NOT NULL DEFAULT 0,
    total_reviews INTEGER NOT NULL DEFAULT 0,
    last_review_date TEXT
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE INDEX IF NOT EXISTS idx_review_records_due ON review_records(next_due_at);
"#;

/// Initialize singleton rows if not exists.
pub const INIT_SINGLETONS: &str = r#"
INSERT OR IGNORE INTO user_settings (id) VALUES (1);
INSERT OR IGNORE INTO progress (id) VALUES (1);
"#;
