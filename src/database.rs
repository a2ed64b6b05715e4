use anyhow::Result;
use libsql::{Builder, Connection};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id             TEXT    PRIMARY KEY,
    name           TEXT    UNIQUE NOT NULL,
    password_hash  TEXT    NOT NULL,
    display_name   TEXT
);
"#;

// Amounts are decimal strings so no precision is lost on the way through
// SQLite's REAL type. Dates keep their DD/MM/YYYY form.
const CREATE_TRANSACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id           TEXT    PRIMARY KEY,
    owner_id     TEXT    NOT NULL,
    category     TEXT    NOT NULL,
    name         TEXT    NOT NULL,
    cost         TEXT    NOT NULL,
    date         TEXT    NOT NULL,
    description  TEXT    NOT NULL DEFAULT '',
    kind         TEXT    NOT NULL,
    created_at   INTEGER NOT NULL
);
"#;

const CREATE_BUDGET_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS budget_targets (
    owner_id  TEXT  PRIMARY KEY,
    target    TEXT  NOT NULL
);
"#;

pub type Db = Arc<RwLock<Connection>>;

/// Main users registry DB (users.db)
pub async fn init_main_db(data_dir: &str) -> Result<Db> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join("users.db");
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    conn.execute(CREATE_USERS_TABLE, ()).await?;
    Ok(Arc::new(RwLock::new(conn)))
}

/// Per-user isolated DB (user_{id}.db) holding that user's ledger and budget
/// target. The schema is created on first open.
pub async fn get_user_db(data_dir: &str, user_id: &str) -> Result<Db> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join(format!("user_{}.db", user_id));
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    conn.execute(CREATE_TRANSACTIONS_TABLE, ()).await?;
    conn.execute(CREATE_BUDGET_TABLE, ()).await?;
    Ok(Arc::new(RwLock::new(conn)))
}
