//! PostgreSQL schema, applied at startup. Every statement is idempotent.

pub const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            UUID PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    name          TEXT,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_TODOS: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id          UUID PRIMARY KEY,
    title       VARCHAR(200) NOT NULL,
    description TEXT,
    completed   BOOLEAN NOT NULL DEFAULT FALSE,
    priority    TEXT NOT NULL DEFAULT 'MEDIUM'
                CHECK (priority IN ('LOW', 'MEDIUM', 'HIGH', 'URGENT')),
    user_id     UUID NOT NULL REFERENCES users(id),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_TODOS_OWNER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_todos_owner_listing
    ON todos (user_id, completed, created_at DESC)
"#;

pub const STATEMENTS: &[&str] = &[CREATE_USERS, CREATE_TODOS, CREATE_TODOS_OWNER_INDEX];
