//! SQL schema for the Staffbell SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS employees (
    employee_id               TEXT PRIMARY KEY,
    first_name                TEXT NOT NULL,
    last_name                 TEXT NOT NULL,
    email                     TEXT NOT NULL UNIQUE,
    role                      TEXT NOT NULL,   -- 'employee' | 'admin'
    birth_date                TEXT,            -- YYYY-MM-DD
    hire_date                 TEXT,            -- YYYY-MM-DD
    salary                    REAL NOT NULL DEFAULT 400 CHECK (salary BETWEEN 0 AND 1500),
    last_salary_increase_date TEXT,            -- YYYY-MM-DD; NULL until the first raise
    created_at                TEXT NOT NULL    -- RFC 3339 UTC
);

-- One row per (recipient, type, event date). Inserts that hit the key are
-- dropped with ON CONFLICT DO NOTHING.
CREATE TABLE IF NOT EXISTS notifications (
    notification_id TEXT PRIMARY KEY,
    recipient_id    TEXT NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE,
    related_user_id TEXT NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE,
    kind            TEXT NOT NULL,
    message         TEXT NOT NULL,
    event_date      TEXT NOT NULL,   -- YYYY-MM-DD
    is_read         INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    UNIQUE (recipient_id, kind, event_date)
);

CREATE INDEX IF NOT EXISTS employees_role_idx         ON employees(role);
CREATE INDEX IF NOT EXISTS notifications_recipient_idx ON notifications(recipient_id, created_at);

PRAGMA user_version = 1;
";
