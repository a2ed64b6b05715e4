use crate::database::{Db, get_user_db};
use crate::error::AppError;

/// Shared by all handlers: the user registry and where per-user ledgers live.
#[derive(Clone)]
pub struct AppState {
    pub main_db: Db,
    pub data_path: String,
}

impl AppState {
    pub fn new(main_db: Db, data_path: impl Into<String>) -> Self {
        Self {
            main_db,
            data_path: data_path.into(),
        }
    }

    /// Opens the ledger database belonging to `user_id`.
    pub async fn user_db(&self, user_id: &str) -> Result<Db, AppError> {
        get_user_db(&self.data_path, user_id)
            .await
            .map_err(|e| AppError::backend(format!("failed to open ledger for {user_id}: {e}")))
    }
}
