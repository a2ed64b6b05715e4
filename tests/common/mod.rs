#![allow(dead_code)]

use budget_tracker_server::database::{Db, get_user_db, init_main_db};
use budget_tracker_server::models::{
    AmountInput, Category, Kind, Transaction, TransactionDate, TransactionForm,
};
use rust_decimal::Decimal;
use tempfile::{TempDir, tempdir};
use uuid::Uuid;

/// Creates an isolated data directory with an initialised registry and one
/// user ledger. Keep the returned `TempDir` alive for the duration of the test.
pub async fn setup_test_environment() -> (String, String, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_path = temp_dir
        .path()
        .to_str()
        .expect("Failed to convert path to string")
        .to_string();
    let user_id = Uuid::new_v4().to_string();

    init_main_db(&data_path)
        .await
        .unwrap_or_else(|e| panic!("Failed to initialize main database at {}: {}", data_path, e));

    get_user_db(&data_path, &user_id).await.unwrap_or_else(|e| {
        panic!(
            "Failed to initialize user database for user {} at {}: {}",
            user_id, data_path, e
        )
    });

    (data_path, user_id, temp_dir)
}

pub async fn open_user_db(data_path: &str, user_id: &str) -> Db {
    get_user_db(data_path, user_id)
        .await
        .unwrap_or_else(|e| panic!("Failed to get user database for {}: {}", user_id, e))
}

pub fn dec(value: &str) -> Decimal {
    value
        .parse()
        .unwrap_or_else(|e| panic!("Bad decimal literal {:?}: {}", value, e))
}

pub fn date(value: &str) -> TransactionDate {
    TransactionDate::parse(value).unwrap_or_else(|| panic!("Bad date literal {:?}", value))
}

/// An in-memory transaction for exercising the ledger functions.
pub fn transaction(name: &str, cost: &str, kind: Kind, category: Category, on: &str) -> Transaction {
    Transaction {
        id: Uuid::new_v4().to_string(),
        owner_id: "owner".to_string(),
        category,
        name: name.to_string(),
        cost: dec(cost),
        date: date(on),
        description: String::new(),
        kind,
        created_at: 1_700_000_000,
    }
}

pub fn income(cost: &str) -> Transaction {
    transaction("Salary", cost, Kind::Income, Category::Income, "01/01/2024")
}

pub fn expense(cost: &str) -> Transaction {
    transaction("Groceries", cost, Kind::Expense, Category::Food, "01/01/2024")
}

/// A form that passes every rule; tests override single fields.
pub fn valid_form() -> TransactionForm {
    TransactionForm {
        category: "food".to_string(),
        name: "Lunch".to_string(),
        cost: AmountInput::from("12.50"),
        date: "15/03/2024".to_string(),
        description: "Sandwich and coffee".to_string(),
        kind: "expense".to_string(),
    }
}
