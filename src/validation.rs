//! Rules a transaction, budget target or account must satisfy before it is
//! written. Every function here is pure; a failure means no write happens.

use rust_decimal::Decimal;

use crate::constants::*;
use crate::ledger::HistoryFilter;
use crate::models::{
    AmountInput, Category, HistoryQuery, Kind, NewTransaction, RegisterPayload, TransactionDate,
    TransactionForm,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill out all required fields: {0} is missing")]
    MissingField(&'static str),

    #[error("Transaction name must be {} characters or less", MAX_TRANSACTION_NAME_LENGTH)]
    NameTooLong,

    #[error("Please enter a valid cost between 0 and {}", MAX_AMOUNT)]
    InvalidCost,

    #[error("Amounts can have at most {} decimal places", AMOUNT_DECIMAL_PLACES)]
    TooManyDecimalPlaces,

    #[error("Date must be in format DD/MM/YYYY with day between 1-31 and month between 1-12")]
    InvalidDate,

    #[error("Unknown category \"{0}\"")]
    UnknownCategory(String),

    #[error("Transaction type must be \"income\" or \"expense\"")]
    UnknownKind(String),

    #[error("Please enter a valid number for the budget")]
    BudgetNotANumber,

    #[error("Budget cannot be negative")]
    BudgetNegative,

    #[error("Budget cannot be greater than {}", MAX_AMOUNT)]
    BudgetTooLarge,

    #[error("Invalid {0} date, expected DD/MM/YYYY or YYYY-MM-DD")]
    InvalidFilterDate(&'static str),

    #[error(
        "Username must be between {} and {} characters",
        MIN_USERNAME_LENGTH,
        MAX_USERNAME_LENGTH
    )]
    UsernameLength,

    #[error("Username can only contain alphanumeric characters, underscores, and hyphens")]
    UsernameCharacters,

    #[error(
        "Password must be between {} and {} characters",
        MIN_PASSWORD_LENGTH,
        MAX_PASSWORD_LENGTH
    )]
    PasswordLength,

    #[error("Display name must be {} characters or less", MAX_DISPLAY_NAME_LENGTH)]
    DisplayNameTooLong,

    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

fn max_amount() -> Decimal {
    Decimal::from(MAX_AMOUNT)
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

fn parse_amount_text(text: &str) -> Option<Decimal> {
    if text.contains('_') {
        return None;
    }
    // Exact parsing fails instead of rounding digits past Decimal's precision.
    Decimal::from_str_exact(text.trim()).ok()
}

/// Parses a user supplied amount. `None` means the text is not a number.
pub fn parse_amount(input: &AmountInput) -> Option<Decimal> {
    parse_amount_text(&input.to_text())
}

/// Checks every transaction rule and returns the normalised transaction.
///
/// Presence of all required fields is checked first so a half filled form
/// reports what is missing rather than why a blank value is malformed.
pub fn validate_transaction(form: &TransactionForm) -> Result<NewTransaction, ValidationError> {
    let category = require(&form.category, "category")?;
    let name = require(&form.name, "name")?;
    let cost_text = form.cost.to_text();
    let cost_text = require(&cost_text, "cost")?;
    let date = require(&form.date, "date")?;
    let kind = require(&form.kind, "type")?;

    if name.chars().count() > MAX_TRANSACTION_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    let mut cost = parse_amount_text(cost_text).ok_or(ValidationError::InvalidCost)?;
    if cost < Decimal::ZERO || cost > max_amount() {
        return Err(ValidationError::InvalidCost);
    }
    if cost.normalize().scale() > AMOUNT_DECIMAL_PLACES {
        return Err(ValidationError::TooManyDecimalPlaces);
    }
    cost.rescale(AMOUNT_DECIMAL_PLACES);

    let date = TransactionDate::parse(date).ok_or(ValidationError::InvalidDate)?;

    let category = category
        .to_lowercase()
        .parse::<Category>()
        .map_err(|_| ValidationError::UnknownCategory(category.to_string()))?;
    let kind = kind
        .to_lowercase()
        .parse::<Kind>()
        .map_err(|_| ValidationError::UnknownKind(kind.to_string()))?;

    Ok(NewTransaction {
        category,
        name: name.to_string(),
        cost,
        date,
        description: form.description.clone(),
        kind,
    })
}

/// Checks a new budget target: a number in `[0, 1,000,000]`.
pub fn validate_budget_target(input: &AmountInput) -> Result<Decimal, ValidationError> {
    let mut target = parse_amount(input).ok_or(ValidationError::BudgetNotANumber)?;

    if target < Decimal::ZERO {
        return Err(ValidationError::BudgetNegative);
    }
    if target > max_amount() {
        return Err(ValidationError::BudgetTooLarge);
    }
    if target.normalize().scale() > AMOUNT_DECIMAL_PLACES {
        return Err(ValidationError::TooManyDecimalPlaces);
    }
    target.rescale(AMOUNT_DECIMAL_PLACES);

    Ok(target)
}

fn parse_filter_date(
    value: Option<&str>,
    which: &'static str,
) -> Result<Option<TransactionDate>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => TransactionDate::parse(v)
            .or_else(|| TransactionDate::parse_iso(v))
            .map(Some)
            .ok_or(ValidationError::InvalidFilterDate(which)),
    }
}

/// Turns the history search query string into a filter. Empty parameters
/// leave their criterion unconstrained.
pub fn parse_history_query(query: &HistoryQuery) -> Result<HistoryFilter, ValidationError> {
    let mut filter = HistoryFilter::new().with_name(query.name.as_deref().unwrap_or_default());

    if let Some(category) = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        let parsed = category
            .to_lowercase()
            .parse::<Category>()
            .map_err(|_| ValidationError::UnknownCategory(category.to_string()))?;
        filter = filter.with_category(parsed);
    }

    if let Some(start) = parse_filter_date(query.start_date.as_deref(), "start")? {
        filter = filter.with_start_date(start);
    }
    if let Some(end) = parse_filter_date(query.end_date.as_deref(), "end")? {
        filter = filter.with_end_date(end);
    }

    Ok(filter)
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::Empty("Username"));
    }
    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameLength);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::UsernameCharacters);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let length = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(ValidationError::PasswordLength);
    }
    Ok(())
}

/// Validates a registration and returns the trimmed display name, if one
/// was given.
pub fn validate_registration(payload: &RegisterPayload) -> Result<Option<String>, ValidationError> {
    validate_username(&payload.username)?;
    validate_password(&payload.password)?;

    let display_name = payload
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    if display_name.is_some_and(|name| name.chars().count() > MAX_DISPLAY_NAME_LENGTH) {
        return Err(ValidationError::DisplayNameTooLong);
    }

    Ok(display_name.map(str::to_string))
}
