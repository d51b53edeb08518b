// API module - T-Invest REST client and response models

pub mod client;
pub mod types;

pub use client::InvestClient;
pub use types::{Account, Instrument, MoneyValue, Operation, PortfolioPosition, Quotation};
