pub const SCHEMA: &str = r#"
-- summaries table
CREATE TABLE IF NOT EXISTS summaries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    object_type TEXT NOT NULL CHECK (object_type IN ('publication', 'section', 'item', 'chunk')),
    object_id INTEGER NOT NULL,
    model TEXT NOT NULL,
    model_version TEXT NOT NULL,
    lang TEXT NOT NULL,
    summary_text TEXT NOT NULL,
    confidence REAL NOT NULL,
    created_by TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_summaries_object ON summaries(object_type, object_id);
"#;
