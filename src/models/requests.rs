//! Request DTOs for the rate hub API
//!
//! Defines the structure of incoming HTTP request bodies and query
//! strings, with the validation applied before any registry write.

use serde::Deserialize;

/// Checks the shape of a currency code: three ASCII uppercase letters.
fn code_error(code: &str, side: &str) -> Option<String> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Some(format!(
            "Invalid '{}' currency code: {}",
            side, code
        ));
    }
    None
}

/// Request body for creating or renaming a bank.
#[derive(Debug, Clone, Deserialize)]
pub struct BankRequest {
    /// The bank's display name
    pub name: String,
}

impl BankRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Bank name cannot be empty".to_string());
        }
        if self.name.len() > 128 {
            return Some("Bank name exceeds maximum length of 128 characters".to_string());
        }
        None
    }
}

/// Request body for creating or updating a currency.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyRequest {
    /// Three-letter currency code, e.g. "USD"
    pub code: String,
    /// Human-readable name
    pub name: String,
}

impl CurrencyRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(error) = code_error(&self.code, "currency") {
            return Some(error);
        }
        if self.name.trim().is_empty() {
            return Some("Currency name cannot be empty".to_string());
        }
        None
    }
}

/// Request body for creating an exchange rate.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExchangeRateRequest {
    pub bank_id: u64,
    pub from_currency_code: String,
    pub to_currency_code: String,
    pub rate: f64,
}

impl CreateExchangeRateRequest {
    pub fn validate(&self) -> Option<String> {
        validate_rate_fields(&self.from_currency_code, &self.to_currency_code, self.rate)
    }
}

/// Request body for updating an exchange rate. The bank cannot change,
/// but the identifying currency codes can.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExchangeRateRequest {
    pub from_currency_code: String,
    pub to_currency_code: String,
    pub rate: f64,
}

impl UpdateExchangeRateRequest {
    pub fn validate(&self) -> Option<String> {
        validate_rate_fields(&self.from_currency_code, &self.to_currency_code, self.rate)
    }
}

fn validate_rate_fields(from: &str, to: &str, rate: f64) -> Option<String> {
    if let Some(error) = code_error(from, "from") {
        return Some(error);
    }
    if let Some(error) = code_error(to, "to") {
        return Some(error);
    }
    if !rate.is_finite() || rate <= 0.0 {
        return Some(format!("Rate must be a positive number, got {}", rate));
    }
    None
}

// == Query Strings ==

/// Query string for the rate listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RateListQuery {
    /// Restrict the listing to one bank
    pub bank_id: Option<u64>,
}

/// Query string for the point rate-value lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct RateValueQuery {
    pub bank_id: u64,
    pub from: String,
    pub to: String,
}

impl RateValueQuery {
    pub fn validate(&self) -> Option<String> {
        code_error(&self.from, "from").or_else(|| code_error(&self.to, "to"))
    }
}

/// Query string for the minimum-rate lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct MinRateQuery {
    pub from: String,
    pub to: String,
}

impl MinRateQuery {
    pub fn validate(&self) -> Option<String> {
        code_error(&self.from, "from").or_else(|| code_error(&self.to, "to"))
    }
}

/// Query string for amount conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertQuery {
    pub bank_id: u64,
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl ConvertQuery {
    pub fn validate(&self) -> Option<String> {
        if let Some(error) = code_error(&self.from, "from") {
            return Some(error);
        }
        if let Some(error) = code_error(&self.to, "to") {
            return Some(error);
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Some(format!(
                "Amount must be a non-negative number, got {}",
                self.amount
            ));
        }
        None
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_request_deserialize() {
        let req: BankRequest = serde_json::from_str(r#"{"name": "Alfa"}"#).unwrap();
        assert_eq!(req.name, "Alfa");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_bank_request_empty_name() {
        let req = BankRequest {
            name: "   ".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_currency_request_code_shape() {
        let bad_cases = ["usd", "US", "USDT", "U1D", ""];
        for code in bad_cases {
            let req = CurrencyRequest {
                code: code.to_string(),
                name: "Dollar".to_string(),
            };
            assert!(req.validate().is_some(), "code {:?} should fail", code);
        }

        let req = CurrencyRequest {
            code: "USD".to_string(),
            name: "US Dollar".to_string(),
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_rate_request_validation() {
        let mut req = CreateExchangeRateRequest {
            bank_id: 1,
            from_currency_code: "USD".to_string(),
            to_currency_code: "EUR".to_string(),
            rate: 0.92,
        };
        assert!(req.validate().is_none());

        req.rate = 0.0;
        assert!(req.validate().is_some());

        req.rate = f64::NAN;
        assert!(req.validate().is_some());

        req.rate = 0.92;
        req.to_currency_code = "eur".to_string();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_query_validation() {
        let query = RateValueQuery {
            bank_id: 1,
            from: "USD".to_string(),
            to: "eur".to_string(),
        };
        assert!(query.validate().is_some());

        let mut convert = ConvertQuery {
            bank_id: 1,
            from: "USD".to_string(),
            to: "EUR".to_string(),
            amount: 10.0,
        };
        assert!(convert.validate().is_none());

        convert.amount = f64::INFINITY;
        assert!(convert.validate().is_some());
    }

    #[test]
    fn test_rate_request_deserialize() {
        let json = r#"{"bank_id": 1, "from_currency_code": "USD", "to_currency_code": "EUR", "rate": 0.92}"#;
        let req: CreateExchangeRateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.bank_id, 1);
        assert_eq!(req.rate, 0.92);
    }
}
