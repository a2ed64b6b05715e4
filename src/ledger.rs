//! Derived values over one user's ledger: balance, budget progress and the
//! history filter. Nothing in here touches the store.

use rust_decimal::Decimal;

use crate::models::{Category, Kind, Transaction, TransactionDate};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The contribution of one transaction to the balance.
pub fn signed_cost(transaction: &Transaction) -> Decimal {
    match transaction.kind {
        Kind::Income => transaction.cost,
        Kind::Expense => -transaction.cost,
    }
}

/// Lifetime net balance: income minus expenses. Dates are not considered.
pub fn aggregate<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(signed_cost).sum()
}

/// Share of `target` reached by `current`, in percent.
///
/// A target of zero or less yields 0. The result is capped at 100 but has no
/// lower bound, so a net loss shows up as a negative percentage. No rounding
/// is applied.
pub fn progress(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match current
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
    {
        Some(percent) => percent.min(HUNDRED),
        // Only reachable for amounts far outside the accepted bounds.
        None if current.is_sign_negative() => Decimal::MIN,
        None => HUNDRED,
    }
}

/// Criteria for the transaction history search. `None` leaves a criterion
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    name_contains: Option<String>,
    pub category_equals: Option<Category>,
    pub start_date: Option<TransactionDate>,
    pub end_date: Option<TransactionDate>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring to look for in transaction names. An empty
    /// needle matches every name and is dropped.
    pub fn with_name(mut self, needle: &str) -> Self {
        let needle = needle.trim();
        self.name_contains = (!needle.is_empty()).then(|| needle.to_lowercase());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category_equals = Some(category);
        self
    }

    pub fn with_start_date(mut self, date: TransactionDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_end_date(mut self, date: TransactionDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn name_contains(&self) -> Option<&str> {
        self.name_contains.as_deref()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.name_contains.is_none()
            && self.category_equals.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        let name_match = self
            .name_contains
            .as_ref()
            .is_none_or(|needle| transaction.name.to_lowercase().contains(needle.as_str()));
        let category_match = self
            .category_equals
            .is_none_or(|category| transaction.category == category);
        let after_start = self.start_date.is_none_or(|start| transaction.date >= start);
        let before_end = self.end_date.is_none_or(|end| transaction.date <= end);

        name_match && category_match && after_start && before_end
    }
}

/// Returns the matching transactions in their original order.
pub fn filter(transactions: &[Transaction], spec: &HistoryFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| spec.matches(transaction))
        .cloned()
        .collect()
}

/// Snapshot of everything one user has recorded, as last fetched from the
/// store. Every screen derives its numbers from one of these.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn balance(&self) -> Decimal {
        aggregate(&self.transactions)
    }

    pub fn progress(&self, target: Decimal) -> Decimal {
        progress(self.balance(), target)
    }

    pub fn filter(&self, spec: &HistoryFilter) -> Vec<Transaction> {
        filter(&self.transactions, spec)
    }
}
