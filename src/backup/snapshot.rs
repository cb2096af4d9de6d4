//! Backup snapshot and its JSON codec
//!
//! A snapshot is a complete copy of transactions, budgets and settings. The
//! encoder is plain serde; the decoder walks a `serde_json::Value` by hand so
//! that every failure can be reported as either a structural problem
//! ([`CodecError::MalformedPayload`]) or a value of the wrong type
//! ([`CodecError::TypeMismatch`]) naming the offending field.

use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{BudgetPalError, BudgetPalResult, CodecError};
use crate::models::{Money, Transaction, TransactionId, TransactionType};
use crate::storage::BudgetStore;

/// One category budget as stored in a backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetEntry {
    pub category: String,
    pub amount: Money,
}

/// Settings captured in a backup; absent keys are left alone on restore
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackupSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_budgets: Option<BTreeMap<String, Money>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
}

/// Full state at a point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<BudgetEntry>,
    pub settings: BackupSettings,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl BackupSnapshot {
    /// Build a snapshot from explicit values, stamped with the current time
    pub fn capture(
        transactions: Vec<Transaction>,
        category_budgets: BTreeMap<String, Money>,
        monthly_budget: Money,
        currency: impl Into<String>,
        onboarding_completed: bool,
    ) -> Self {
        let budgets = category_budgets
            .iter()
            .map(|(category, amount)| BudgetEntry {
                category: category.clone(),
                amount: *amount,
            })
            .collect();

        Self {
            transactions,
            budgets,
            settings: BackupSettings {
                monthly_budget: Some(monthly_budget),
                category_budgets: Some(category_budgets),
                selected_currency: Some(currency.into()),
                onboarding_completed: Some(onboarding_completed),
            },
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    /// Snapshot the store; every expense category gets a budget entry
    pub fn from_store<S: BudgetStore>(store: &S) -> BudgetPalResult<Self> {
        let allocation = store.allocation()?;

        let mut category_budgets: BTreeMap<String, Money> = store
            .categories(TransactionType::Expense)
            .into_iter()
            .map(|category| {
                let amount = allocation.budget_for(&category);
                (category, amount)
            })
            .collect();
        // Keep budgets for categories that were since removed from settings
        for (category, amount) in &allocation.category_budgets {
            category_budgets.entry(category.clone()).or_insert(*amount);
        }

        Ok(Self::capture(
            store.transactions()?,
            category_budgets,
            allocation.monthly_budget,
            store.selected_currency()?,
            store.is_onboarding_completed()?,
        ))
    }

    /// Encode as pretty-printed JSON
    pub fn serialize(&self) -> BudgetPalResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BudgetPalError::Json(format!("Failed to serialize backup: {}", e)))
    }

    /// Decode a backup payload
    pub fn deserialize(text: &str) -> Result<Self, CodecError> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| CodecError::MalformedPayload(format!("not valid JSON: {}", e)))?;

        let Value::Object(root) = root else {
            return Err(CodecError::MalformedPayload(
                "top level must be an object".into(),
            ));
        };

        let transactions = match section(&root, "transactions")? {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| decode_transaction(i, item))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(wrong_container("transactions", "an array")),
        };

        let budgets = match section(&root, "budgets")? {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| decode_budget(i, item))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(wrong_container("budgets", "an array")),
        };

        let settings = match section(&root, "settings")? {
            Value::Object(map) => decode_settings(map)?,
            _ => return Err(wrong_container("settings", "an object")),
        };

        let timestamp = match present(&root, "timestamp") {
            Some(value) => as_millis(value, "timestamp")?,
            None => DateTime::<Utc>::default(),
        };

        Ok(Self {
            transactions,
            budgets,
            settings,
            timestamp,
        })
    }
}

fn section<'v>(root: &'v Map<String, Value>, key: &str) -> Result<&'v Value, CodecError> {
    root.get(key)
        .ok_or_else(|| CodecError::MalformedPayload(format!("missing '{}'", key)))
}

fn wrong_container(key: &str, expected: &str) -> CodecError {
    CodecError::MalformedPayload(format!("'{}' must be {}", key, expected))
}

fn mismatch(field: impl Into<String>, expected: &str) -> CodecError {
    CodecError::TypeMismatch {
        field: field.into(),
        expected: expected.to_string(),
    }
}

/// A key whose value is neither absent nor null
fn present<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn required<'v>(map: &'v Map<String, Value>, path: &str, key: &str) -> Result<&'v Value, CodecError> {
    present(map, key)
        .ok_or_else(|| CodecError::MalformedPayload(format!("{} is missing '{}'", path, key)))
}

fn as_money(value: &Value, field: &str) -> Result<Money, CodecError> {
    value
        .as_f64()
        .and_then(Money::from_f64)
        .ok_or_else(|| mismatch(field, "number"))
}

fn as_string(value: &Value, field: &str) -> Result<String, CodecError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(field, "string"))
}

fn as_bool(value: &Value, field: &str) -> Result<bool, CodecError> {
    value.as_bool().ok_or_else(|| mismatch(field, "boolean"))
}

fn as_millis(value: &Value, field: &str) -> Result<DateTime<Utc>, CodecError> {
    value
        .as_i64()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .ok_or_else(|| mismatch(field, "integer epoch milliseconds"))
}

fn as_object<'v>(value: &'v Value, field: &str) -> Result<&'v Map<String, Value>, CodecError> {
    value.as_object().ok_or_else(|| mismatch(field, "object"))
}

fn decode_transaction(index: usize, value: &Value) -> Result<Transaction, CodecError> {
    let path = format!("transactions[{}]", index);
    let map = as_object(value, &path)?;
    let field = |key: &str| format!("{}.{}", path, key);

    let kind = match required(map, &path, "type")?.as_str() {
        Some("INCOME") => TransactionType::Income,
        Some("EXPENSE") => TransactionType::Expense,
        _ => return Err(mismatch(field("type"), "\"INCOME\" or \"EXPENSE\"")),
    };

    let description = match present(map, "description") {
        Some(v) => as_string(v, &field("description"))?,
        None => String::new(),
    };

    Ok(Transaction {
        id: TransactionId::from_string(as_string(required(map, &path, "id")?, &field("id"))?),
        amount: as_money(required(map, &path, "amount")?, &field("amount"))?,
        category: as_string(required(map, &path, "category")?, &field("category"))?,
        kind,
        description,
        date: as_millis(required(map, &path, "date")?, &field("date"))?,
    })
}

fn decode_budget(index: usize, value: &Value) -> Result<BudgetEntry, CodecError> {
    let path = format!("budgets[{}]", index);
    let map = as_object(value, &path)?;

    Ok(BudgetEntry {
        category: as_string(
            required(map, &path, "category")?,
            &format!("{}.category", path),
        )?,
        amount: as_money(required(map, &path, "amount")?, &format!("{}.amount", path))?,
    })
}

fn decode_settings(map: &Map<String, Value>) -> Result<BackupSettings, CodecError> {
    let mut settings = BackupSettings::default();

    if let Some(v) = present(map, "monthly_budget") {
        settings.monthly_budget = Some(as_money(v, "settings.monthly_budget")?);
    }

    if let Some(v) = present(map, "category_budgets") {
        let entries = as_object(v, "settings.category_budgets")?;
        let mut budgets = BTreeMap::new();
        for (category, amount) in entries {
            let field = format!("settings.category_budgets.{}", category);
            budgets.insert(category.clone(), as_money(amount, &field)?);
        }
        settings.category_budgets = Some(budgets);
    }

    if let Some(v) = present(map, "selected_currency") {
        settings.selected_currency = Some(as_string(v, "settings.selected_currency")?);
    }

    if let Some(v) = present(map, "onboarding_completed") {
        settings.onboarding_completed = Some(as_bool(v, "settings.onboarding_completed")?);
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BackupSnapshot {
        let mut budgets = BTreeMap::new();
        budgets.insert("Food".to_string(), Money::from_cents(30_050));
        budgets.insert("Housing".to_string(), Money::zero());

        let mut salary = Transaction::income(Money::from_units(2500), "Salary", Utc::now());
        salary.description = "June".into();

        BackupSnapshot::capture(
            vec![
                Transaction::expense(Money::from_cents(1250), "Food", Utc::now()),
                salary,
            ],
            budgets,
            Money::from_units(1000),
            "LKR",
            true,
        )
    }

    #[test]
    fn test_round_trip() {
        let snapshot = sample();
        let text = snapshot.serialize().unwrap();
        assert_eq!(BackupSnapshot::deserialize(&text).unwrap(), snapshot);
    }

    #[test]
    fn test_round_trip_empty() {
        let snapshot =
            BackupSnapshot::capture(Vec::new(), BTreeMap::new(), Money::zero(), "USD", false);
        let text = snapshot.serialize().unwrap();
        let decoded = BackupSnapshot::deserialize(&text).unwrap();
        assert_eq!(decoded, snapshot);
        assert!(decoded.transactions.is_empty());
        assert!(decoded.budgets.is_empty());
    }

    #[test]
    fn test_wire_format() {
        let text = sample().serialize().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["transactions"][0]["type"], "EXPENSE");
        assert_eq!(value["transactions"][0]["amount"], 12.5);
        assert!(value["transactions"][0]["date"].is_i64());
        assert_eq!(value["budgets"][0]["category"], "Food");
        assert_eq!(value["budgets"][0]["amount"], 300.5);
        assert_eq!(value["settings"]["selected_currency"], "LKR");
        assert_eq!(value["settings"]["category_budgets"]["Food"], 300.5);
        assert!(value["timestamp"].is_i64());
    }

    #[test]
    fn test_malformed_payloads() {
        let cases = [
            "not json",
            "[]",
            r#"{"budgets":[],"settings":{}}"#,
            r#"{"transactions":[],"settings":{}}"#,
            r#"{"transactions":[],"budgets":[]}"#,
            r#"{"transactions":{},"budgets":[],"settings":{}}"#,
            r#"{"transactions":[],"budgets":[],"settings":[]}"#,
            r#"{"transactions":[{"id":"a","category":"Food","type":"EXPENSE","date":0}],"budgets":[],"settings":{}}"#,
        ];

        for case in cases {
            assert!(
                matches!(
                    BackupSnapshot::deserialize(case),
                    Err(CodecError::MalformedPayload(_))
                ),
                "expected malformed for {}",
                case
            );
        }
    }

    #[test]
    fn test_type_mismatch_names_field() {
        let err = BackupSnapshot::deserialize(
            r#"{"transactions":[],"budgets":[],"settings":{"monthly_budget":"lots"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                field: "settings.monthly_budget".into(),
                expected: "number".into()
            }
        );

        let err = BackupSnapshot::deserialize(
            r#"{"transactions":[{"id":"a","amount":"12","category":"Food","type":"EXPENSE","date":0}],
                "budgets":[],"settings":{}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::TypeMismatch { ref field, .. } if field == "transactions[0].amount"
        ));

        let err = BackupSnapshot::deserialize(
            r#"{"transactions":[],"budgets":[{"category":"Food","amount":true}],"settings":{}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn test_minimal_payload_defaults() {
        let snapshot =
            BackupSnapshot::deserialize(r#"{"transactions":[],"budgets":[],"settings":{}}"#)
                .unwrap();

        assert_eq!(snapshot.settings, BackupSettings::default());
        assert_eq!(snapshot.timestamp.timestamp_millis(), 0);
    }

    #[test]
    fn test_foreign_ids_and_null_description() {
        let snapshot = BackupSnapshot::deserialize(
            r#"{"transactions":[{"id":"42","amount":3,"category":"Gifts","type":"EXPENSE",
                "description":null,"date":1717580000000}],
                "budgets":[],"settings":{"selected_currency":null},"timestamp":5}"#,
        )
        .unwrap();

        let txn = &snapshot.transactions[0];
        assert_eq!(txn.id.as_str(), "42");
        assert_eq!(txn.description, "");
        assert_eq!(txn.date.timestamp_millis(), 1_717_580_000_000);
        assert!(snapshot.settings.selected_currency.is_none());
    }
}
