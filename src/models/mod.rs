//! Request and Response models for the rate hub API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    BankRequest, ConvertQuery, CreateExchangeRateRequest, CurrencyRequest, MinRateQuery,
    RateListQuery, RateValueQuery, UpdateExchangeRateRequest,
};
pub use responses::{
    BankResponse, CacheStatsResponse, ConversionResponse, CurrencyResponse, ErrorResponse,
    ExchangeRateResponse, HealthResponse, PartitionStats, RateValueResponse, VisitsResponse,
};
