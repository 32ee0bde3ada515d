//! Cache Keying Module
//!
//! Deterministic derivation of textual cache keys from logical query
//! identities. Read handlers and write-time eviction both go through these
//! functions, so two independently derived keys for the same logical
//! entity are textually identical.

/// Listing key for the full bank collection.
pub fn banks() -> String {
    "/banks".to_string()
}

/// Key for a single bank lookup.
pub fn bank(id: u64) -> String {
    format!("/banks/{}", id)
}

/// Key for the banks-quoting-a-currency query.
pub fn banks_by_currency(code: &str) -> String {
    format!("/banks/by-currency/{}", code)
}

/// Listing key for the full currency collection.
pub fn currencies() -> String {
    "/currencies".to_string()
}

/// Key for a single currency lookup.
pub fn currency(id: u64) -> String {
    format!("/currencies/{}", id)
}

/// Listing key for the full exchange-rate collection.
pub fn rates() -> String {
    "/exchange-rates".to_string()
}

/// Key for a single exchange-rate lookup.
pub fn rate(id: u64) -> String {
    format!("/exchange-rates/{}", id)
}

/// Listing key for one bank's exchange rates.
pub fn rates_by_bank(bank_id: u64) -> String {
    format!("/exchange-rates?bank_id={}", bank_id)
}

/// Key for the minimum-rate query across banks.
pub fn min_rate(from_code: &str, to_code: &str) -> String {
    format!("/exchange-rates/min-rate?from={}&to={}", from_code, to_code)
}

/// Point key for one rate value, built from the identity tuple.
///
/// Collision-free for the practical key space: bank ids are numeric and
/// currency codes contain no separator.
pub fn rate_value(bank_id: u64, from_code: &str, to_code: &str) -> String {
    format!("{}-{}-{}", bank_id, from_code, to_code)
}
