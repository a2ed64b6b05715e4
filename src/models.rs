use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Spending category of a transaction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Bills,
    Entertainment,
    Income,
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Bills,
        Category::Entertainment,
        Category::Income,
        Category::Uncategorized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Bills => "bills",
            Category::Entertainment => "entertainment",
            Category::Income => "income",
            Category::Uncategorized => "uncategorized",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl FromStr for Kind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            _ => Err(()),
        }
    }
}

/// A calendar date as written on a transaction, `DD/MM/YYYY`.
///
/// Only the ranges of the individual fields are checked: day 1-31, month
/// 1-12 and a four digit year. `31/04/2024` is therefore a valid value.
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionDate {
    year: u16,
    month: u8,
    day: u8,
}

impl TransactionDate {
    pub fn new(day: u8, month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) || year > 9999 {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Parses `D/M/YYYY` or `DD/MM/YYYY`.
    pub fn parse(s: &str) -> Option<Self> {
        let [day, month, year] = split_three(s.trim(), '/')?;
        Self::new(
            parse_digits(day, 2)? as u8,
            parse_digits(month, 2)? as u8,
            parse_four_digit_year(year)?,
        )
    }

    /// Parses `YYYY-MM-DD`, the format submitted by HTML date inputs.
    pub fn parse_iso(s: &str) -> Option<Self> {
        let [year, month, day] = split_three(s.trim(), '-')?;
        Self::new(
            parse_digits(day, 2)? as u8,
            parse_digits(month, 2)? as u8,
            parse_four_digit_year(year)?,
        )
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.year
    }
}

fn split_three(s: &str, separator: char) -> Option<[&str; 3]> {
    let mut parts = s.split(separator);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([first, second, third])
}

fn parse_digits(part: &str, max_len: usize) -> Option<u16> {
    if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn parse_four_digit_year(part: &str) -> Option<u16> {
    if part.len() != 4 {
        return None;
    }
    parse_digits(part, 4)
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

impl Serialize for TransactionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub owner_id: String,
    pub category: Category,
    pub name: String,
    pub cost: Decimal,
    pub date: TransactionDate,
    pub description: String,
    pub kind: Kind,
    pub created_at: i64,
}

/// The user editable part of a transaction, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub category: Category,
    pub name: String,
    pub cost: Decimal,
    pub date: TransactionDate,
    pub description: String,
    pub kind: Kind,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BudgetTarget {
    pub owner_id: String,
    pub target: Decimal,
}

/// A monetary amount as typed by the user: JSON clients may send either
/// `"12.50"` or `12.5`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(f64),
}

impl Default for AmountInput {
    fn default() -> Self {
        AmountInput::Text(String::new())
    }
}

impl AmountInput {
    pub fn to_text(&self) -> String {
        match self {
            AmountInput::Text(text) => text.trim().to_string(),
            AmountInput::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

/// Raw create/update payload for a transaction. Missing fields deserialize as
/// empty so the validator can report them by name.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct TransactionForm {
    pub category: String,
    pub name: String,
    pub cost: AmountInput,
    pub date: String,
    pub description: String,
    #[serde(alias = "type")]
    pub kind: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct BudgetForm {
    pub target: AmountInput,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct HistoryQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HomeSummary {
    pub display_name: String,
    pub balance: Decimal,
    pub target: Decimal,
    pub progress: Decimal,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub balance: Decimal,
    pub target: Decimal,
    pub progress: Decimal,
}

#[derive(Serialize, Debug, Clone)]
pub struct HistoryResponse {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub matched_count: usize,
}
