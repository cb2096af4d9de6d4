//! Supported display currencies
//!
//! Amounts are currency-agnostic; the selected code only changes how they are
//! labelled.

/// Currency codes a user can pick
pub const SUPPORTED_CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "INR", "AUD", "CAD", "LKR", "CNY", "SGD", "MYR", "THB", "IDR",
    "PHP", "VND", "KRW", "AED", "SAR", "QAR",
];

/// Currency used until the user picks one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Normalize a user supplied code, returning it if supported
pub fn normalize_currency(code: &str) -> Option<&'static str> {
    let upper = code.trim().to_ascii_uppercase();
    SUPPORTED_CURRENCIES
        .iter()
        .find(|c| **c == upper)
        .copied()
}
