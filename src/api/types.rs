//! Response models for the T-Invest REST API.
//!
//! The REST transport is gRPC-web JSON: field names are camelCase, int64
//! values arrive as strings, and fields at their proto default may be
//! omitted entirely. Every optional field is modeled as an explicit
//! `Option` rather than probed dynamically.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::convert;

/// Deserialize an int64 that may arrive as a JSON string or number.
fn de_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Str(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// A quantity as integer units plus a nano fraction in billionths.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Quotation {
    #[serde(default, deserialize_with = "de_i64")]
    pub units: i64,
    #[serde(default)]
    pub nano: i32,
}

impl Quotation {
    pub fn to_decimal(self) -> Decimal {
        convert::quotation_to_decimal(self.units, self.nano)
    }

    pub fn to_f64(self) -> f64 {
        convert::quotation_to_f64(self.units, self.nano)
    }
}

/// A money amount: a (units, nano) pair tagged with a currency code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyValue {
    #[serde(default)]
    pub currency: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub units: i64,
    #[serde(default)]
    pub nano: i32,
}

impl MoneyValue {
    pub fn to_decimal(&self) -> Decimal {
        convert::quotation_to_decimal(self.units, self.nano)
    }

    pub fn to_f64(&self) -> f64 {
        convert::quotation_to_f64(self.units, self.nano)
    }
}

/// One held instrument in a portfolio snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub figi: Option<String>,
    pub instrument_type: Option<String>,
    pub quantity: Option<Quotation>,
    pub average_position_price: Option<MoneyValue>,
    pub expected_yield: Option<Quotation>,
    pub current_nkd: Option<MoneyValue>,
    pub average_position_price_pt: Option<Quotation>,
    pub current_price: Option<MoneyValue>,
    pub average_position_price_fifo: Option<MoneyValue>,
    pub quantity_lots: Option<Quotation>,
    pub blocked: Option<bool>,
    pub blocked_lots: Option<Quotation>,
    pub position_uid: Option<String>,
    pub instrument_uid: Option<String>,
    pub var_margin: Option<MoneyValue>,
    pub expected_yield_fifo: Option<Quotation>,
    pub daily_yield: Option<MoneyValue>,
    pub ticker: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioResponse {
    #[serde(default)]
    pub positions: Vec<PortfolioPosition>,
}

/// One historical ledger entry: a trade, dividend, fee or tax.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub parent_operation_id: Option<String>,
    #[serde(default)]
    pub currency: String,
    pub payment: Option<MoneyValue>,
    pub price: Option<MoneyValue>,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub figi: String,
    #[serde(default)]
    pub instrument_type: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub operation_type: String,
    pub commission: Option<MoneyValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationsResponse {
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// Ticker and display name of an instrument, keyed by FIGI upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Instrument {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstrumentResponse {
    pub instrument: Option<Instrument>,
}

/// A brokerage account available to the token.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}
