pub const SCHEMA: &str = r#"
-- Every persisted document lives under a single key
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,              -- JSON document
    updated_at TEXT DEFAULT (datetime('now'))
);
"#;
