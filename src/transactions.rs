use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tower_sessions::Session;

use crate::auth::get_current_user;
use crate::database::Db;
use crate::error::AppError;
use crate::ledger::Ledger;
use crate::models::{HistoryQuery, HistoryResponse, Transaction, TransactionForm};
use crate::state::AppState;
use crate::store;
use crate::validation::{parse_history_query, validate_transaction};

/// Validates `form` and, only if every rule passes, writes it.
///
/// With `existing_id` the transaction is replaced in place, otherwise a new
/// one is created.
pub async fn commit_transaction(
    db: &Db,
    owner_id: &str,
    existing_id: Option<&str>,
    form: &TransactionForm,
) -> Result<Transaction, AppError> {
    let new = validate_transaction(form).inspect_err(|e| {
        tracing::debug!("rejected transaction for {owner_id}: {e}");
    })?;

    let transaction = match existing_id {
        Some(id) => store::update_transaction(db, owner_id, id, &new).await?,
        None => store::insert_transaction(db, owner_id, &new).await?,
    };

    tracing::info!(
        "saved transaction {} for {owner_id} ({} {})",
        transaction.id,
        transaction.kind.as_str(),
        transaction.cost
    );
    Ok(transaction)
}

pub async fn create_transaction(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let user = get_current_user(&session).await?;
    let user_db = state.user_db(&user.id).await?;

    let transaction = commit_transaction(&user_db, &user.id, None, &form).await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(transaction_id): Path<String>,
    Json(form): Json<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let user = get_current_user(&session).await?;
    let user_db = state.user_db(&user.id).await?;

    let transaction = commit_transaction(&user_db, &user.id, Some(&transaction_id), &form).await?;

    Ok((StatusCode::OK, Json(transaction)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(transaction_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user = get_current_user(&session).await?;
    let user_db = state.user_db(&user.id).await?;

    store::delete_transaction(&user_db, &user.id, &transaction_id).await?;
    tracing::info!("deleted transaction {transaction_id} for {}", user.id);

    Ok(StatusCode::NO_CONTENT)
}

/// Transaction history. The whole ledger is fetched once and the search
/// criteria are applied in memory.
pub async fn get_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<HistoryQuery>,
) -> Result<(StatusCode, Json<HistoryResponse>), AppError> {
    let user = get_current_user(&session).await?;
    let filter = parse_history_query(&query)?;

    let user_db = state.user_db(&user.id).await?;
    let ledger = Ledger::new(store::list_transactions(&user_db, &user.id).await?);

    let transactions = ledger.filter(&filter);

    Ok((
        StatusCode::OK,
        Json(HistoryResponse {
            total_count: ledger.len(),
            matched_count: transactions.len(),
            transactions,
        }),
    ))
}
