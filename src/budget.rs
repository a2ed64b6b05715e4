use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use tower_sessions::Session;

use crate::auth::get_current_user;
use crate::constants::DEFAULT_DISPLAY_NAME;
use crate::database::Db;
use crate::error::AppError;
use crate::ledger::Ledger;
use crate::models::{BudgetForm, BudgetSummary, BudgetTarget, HomeSummary, PublicUser};
use crate::state::AppState;
use crate::store;
use crate::validation::validate_budget_target;

/// A user's ledger together with their budget target, as fetched for one
/// request. An unset target counts as zero.
#[derive(Debug, Clone, Default)]
pub struct BudgetSnapshot {
    pub ledger: Ledger,
    pub target: Decimal,
}

impl BudgetSnapshot {
    pub async fn load(db: &Db, owner_id: &str) -> Result<Self, AppError> {
        let transactions = store::list_transactions(db, owner_id).await?;
        let target = store::get_budget_target(db, owner_id)
            .await?
            .map_or(Decimal::ZERO, |budget| budget.target);

        Ok(Self {
            ledger: Ledger::new(transactions),
            target,
        })
    }

    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary {
            balance: self.ledger.balance(),
            target: self.target,
            progress: self.ledger.progress(self.target),
        }
    }

    pub fn home_summary(&self, user: &PublicUser) -> HomeSummary {
        let BudgetSummary {
            balance,
            target,
            progress,
        } = self.summary();

        HomeSummary {
            display_name: user
                .display_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            balance,
            target,
            progress,
        }
    }
}

/// Validates and stores a new budget target.
pub async fn commit_budget_target(
    db: &Db,
    owner_id: &str,
    form: &BudgetForm,
) -> Result<BudgetTarget, AppError> {
    let target = validate_budget_target(&form.target).inspect_err(|e| {
        tracing::debug!("rejected budget target for {owner_id}: {e}");
    })?;

    let budget = store::upsert_budget_target(db, owner_id, target).await?;
    tracing::info!("budget target for {owner_id} set to {}", budget.target);
    Ok(budget)
}

/// Home screen numbers: greeting name, balance, target and progress.
pub async fn get_home_summary(
    State(state): State<AppState>,
    session: Session,
) -> Result<(StatusCode, Json<HomeSummary>), AppError> {
    let user = get_current_user(&session).await?;
    let user_db = state.user_db(&user.id).await?;

    let snapshot = BudgetSnapshot::load(&user_db, &user.id).await?;

    Ok((StatusCode::OK, Json(snapshot.home_summary(&user))))
}

pub async fn get_budget(
    State(state): State<AppState>,
    session: Session,
) -> Result<(StatusCode, Json<BudgetSummary>), AppError> {
    let user = get_current_user(&session).await?;
    let user_db = state.user_db(&user.id).await?;

    let snapshot = BudgetSnapshot::load(&user_db, &user.id).await?;

    Ok((StatusCode::OK, Json(snapshot.summary())))
}

pub async fn set_budget(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<BudgetForm>,
) -> Result<(StatusCode, Json<BudgetSummary>), AppError> {
    let user = get_current_user(&session).await?;
    let user_db = state.user_db(&user.id).await?;

    commit_budget_target(&user_db, &user.id, &form).await?;
    let snapshot = BudgetSnapshot::load(&user_db, &user.id).await?;

    Ok((StatusCode::OK, Json(snapshot.summary())))
}
