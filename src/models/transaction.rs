//! Transaction model
//!
//! A transaction is either income or an expense, filed under one category of
//! the matching kind. Transactions are never partially updated: an edit
//! replaces everything except the id and the original date.

use chrono::{DateTime, Local, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Lowercase label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, fixed at creation
    pub id: TransactionId,

    /// Always positive; the direction comes from `kind`
    pub amount: Money,

    /// Category name, one of the configured names for `kind`
    pub category: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    #[serde(default)]
    pub description: String,

    /// When the transaction happened, millisecond precision
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    ///
    /// The date is truncated to milliseconds, the precision it is stored at.
    pub fn new(
        kind: TransactionType,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            category: category.into(),
            kind,
            description: description.into(),
            date: date.trunc_subsecs(3),
        }
    }

    /// Shorthand for an expense
    pub fn expense(amount: Money, category: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::new(TransactionType::Expense, amount, category, "", date)
    }

    /// Shorthand for income
    pub fn income(amount: Money, category: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::new(TransactionType::Income, amount, category, "", date)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// The date in the local calendar
    pub fn local_date(&self) -> DateTime<Local> {
        self.date.with_timezone(&Local)
    }

    /// Signed amount: positive for income, negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.local_date().format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_truncates_to_millis() {
        let date = Utc.timestamp_opt(1_717_579_200, 123_456_789).unwrap();
        let txn = Transaction::expense(Money::from_units(5), "Food", date);
        assert_eq!(txn.date.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_json_shape() {
        let date = Utc.timestamp_millis_opt(1_717_579_200_000).unwrap();
        let mut txn = Transaction::expense(Money::from_cents(5025), "Food", date);
        txn.id = TransactionId::from_string("t1");

        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["id"], "t1");
        assert_eq!(value["amount"], 50.25);
        assert_eq!(value["type"], "EXPENSE");
        assert_eq!(value["date"], 1_717_579_200_000i64);
        assert_eq!(value["description"], "");
    }

    #[test]
    fn test_description_defaults_when_missing() {
        let json = r#"{"id":"x","amount":3,"category":"Salary","type":"INCOME","date":0}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert!(txn.is_income());
        assert_eq!(txn.description, "");
        assert_eq!(txn.amount, Money::from_units(3));
    }

    #[test]
    fn test_signed_amount() {
        let now = Utc::now();
        assert_eq!(
            Transaction::expense(Money::from_units(2), "Food", now).signed_amount(),
            Money::from_units(-2)
        );
        assert_eq!(
            Transaction::income(Money::from_units(2), "Salary", now).signed_amount(),
            Money::from_units(2)
        );
    }

    #[test]
    fn test_type_parse() {
        assert_eq!("Income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!("EXPENSE".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("refund".parse::<TransactionType>().is_err());
    }
}
