//! Ledger persistence: the reads and writes the screens need, against the
//! owner's libsql database. Validation has already happened by the time any
//! of these is called.

use libsql::{Connection, Value};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::database::Db;
use crate::error::AppError;
use crate::models::{BudgetTarget, Category, Kind, NewTransaction, Transaction, TransactionDate};

const TRANSACTION_COLUMNS: &str =
    "id, owner_id, category, name, cost, date, description, kind, created_at";

fn text(value: impl Into<String>) -> Value {
    Value::Text(value.into())
}

fn corrupt(field: &str) -> AppError {
    AppError::backend(format!("invalid transaction {field} in store"))
}

pub fn extract_transaction_from_row(row: libsql::Row) -> Result<Transaction, AppError> {
    let id: String = row.get(0)?;
    let owner_id: String = row.get(1)?;
    let category: String = row.get(2)?;
    let name: String = row.get(3)?;
    let cost: String = row.get(4)?;
    let date: String = row.get(5)?;
    let description: String = row.get(6)?;
    let kind: String = row.get(7)?;
    let created_at: i64 = row.get(8)?;

    Ok(Transaction {
        id,
        owner_id,
        category: category
            .parse::<Category>()
            .map_err(|_| corrupt("category"))?,
        name,
        cost: cost.parse::<Decimal>().map_err(|_| corrupt("cost"))?,
        date: TransactionDate::parse(&date).ok_or_else(|| corrupt("date"))?,
        description,
        kind: kind.parse::<Kind>().map_err(|_| corrupt("kind"))?,
        created_at,
    })
}

async fn fetch_transaction(
    conn: &Connection,
    owner_id: &str,
    transaction_id: &str,
) -> Result<Option<Transaction>, AppError> {
    let mut rows = conn
        .query(
            &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ? AND owner_id = ?"),
            vec![text(transaction_id), text(owner_id)],
        )
        .await?;

    match rows.next().await? {
        Some(row) => Ok(Some(extract_transaction_from_row(row)?)),
        None => Ok(None),
    }
}

/// Every transaction the user owns, newest first. No pagination.
pub async fn list_transactions(db: &Db, owner_id: &str) -> Result<Vec<Transaction>, AppError> {
    let conn = db.read().await;
    let mut rows = conn
        .query(
            &format!(
                "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE owner_id = ? \
                 ORDER BY created_at DESC, rowid DESC"
            ),
            vec![text(owner_id)],
        )
        .await?;

    let mut transactions = Vec::new();
    while let Some(row) = rows.next().await? {
        transactions.push(extract_transaction_from_row(row)?);
    }
    Ok(transactions)
}

pub async fn get_transaction(
    db: &Db,
    owner_id: &str,
    transaction_id: &str,
) -> Result<Option<Transaction>, AppError> {
    let conn = db.read().await;
    fetch_transaction(&conn, owner_id, transaction_id).await
}

pub async fn insert_transaction(
    db: &Db,
    owner_id: &str,
    new: &NewTransaction,
) -> Result<Transaction, AppError> {
    let id = Uuid::new_v4().to_string();
    let created_at = time::OffsetDateTime::now_utc().unix_timestamp();

    let conn = db.write().await;
    conn.execute(
        &format!("INSERT INTO transactions ({TRANSACTION_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"),
        vec![
            text(id.as_str()),
            text(owner_id),
            text(new.category.as_str()),
            text(new.name.as_str()),
            text(new.cost.to_string()),
            text(new.date.to_string()),
            text(new.description.as_str()),
            text(new.kind.as_str()),
            Value::Integer(created_at),
        ],
    )
    .await?;

    Ok(Transaction {
        id,
        owner_id: owner_id.to_string(),
        category: new.category,
        name: new.name.clone(),
        cost: new.cost,
        date: new.date,
        description: new.description.clone(),
        kind: new.kind,
        created_at,
    })
}

/// Replaces the editable fields of one transaction. The ID, owner and
/// creation time are kept.
pub async fn update_transaction(
    db: &Db,
    owner_id: &str,
    transaction_id: &str,
    new: &NewTransaction,
) -> Result<Transaction, AppError> {
    let conn = db.write().await;
    let affected = conn
        .execute(
            "UPDATE transactions SET category = ?, name = ?, cost = ?, date = ?, description = ?, kind = ? \
             WHERE id = ? AND owner_id = ?",
            vec![
                text(new.category.as_str()),
                text(new.name.as_str()),
                text(new.cost.to_string()),
                text(new.date.to_string()),
                text(new.description.as_str()),
                text(new.kind.as_str()),
                text(transaction_id),
                text(owner_id),
            ],
        )
        .await?;

    if affected == 0 {
        return Err(AppError::NotFound);
    }

    fetch_transaction(&conn, owner_id, transaction_id)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn delete_transaction(
    db: &Db,
    owner_id: &str,
    transaction_id: &str,
) -> Result<(), AppError> {
    let conn = db.write().await;
    let affected = conn
        .execute(
            "DELETE FROM transactions WHERE id = ? AND owner_id = ?",
            vec![text(transaction_id), text(owner_id)],
        )
        .await?;

    if affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// The user's budget target, or `None` if they never set one.
pub async fn get_budget_target(db: &Db, owner_id: &str) -> Result<Option<BudgetTarget>, AppError> {
    let conn = db.read().await;
    let mut rows = conn
        .query(
            "SELECT target FROM budget_targets WHERE owner_id = ?",
            vec![text(owner_id)],
        )
        .await?;

    let Some(row) = rows.next().await? else {
        return Ok(None);
    };
    let target: String = row.get(0)?;
    let target = target
        .parse::<Decimal>()
        .map_err(|_| AppError::backend("invalid budget target in store"))?;

    Ok(Some(BudgetTarget {
        owner_id: owner_id.to_string(),
        target,
    }))
}

/// Creates or replaces the user's budget target.
pub async fn upsert_budget_target(
    db: &Db,
    owner_id: &str,
    target: Decimal,
) -> Result<BudgetTarget, AppError> {
    let conn = db.write().await;
    conn.execute(
        "INSERT INTO budget_targets (owner_id, target) VALUES (?, ?) \
         ON CONFLICT(owner_id) DO UPDATE SET target = excluded.target",
        vec![text(owner_id), text(target.to_string())],
    )
    .await?;

    Ok(BudgetTarget {
        owner_id: owner_id.to_string(),
        target,
    })
}
