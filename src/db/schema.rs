pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS plan (
    id           INTEGER PRIMARY KEY CHECK (id = 1),
    total_budget TEXT NOT NULL,
    region       TEXT NOT NULL,
    locality     TEXT NOT NULL,
    currency     TEXT NOT NULL DEFAULT 'USD',
    event_date   TEXT NOT NULL DEFAULT '',
    saved_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS allocations (
    position  INTEGER NOT NULL,
    category  TEXT NOT NULL UNIQUE,
    amount    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS actual_expenses (
    category  TEXT NOT NULL UNIQUE,
    amount    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS custom_categories (
    category  TEXT NOT NULL UNIQUE
);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[
    // Future migrations go here:
    // (1, "ALTER TABLE plan ADD COLUMN guest_count INTEGER NOT NULL DEFAULT 0;"),
];
