//! Invest Report - T-Invest account reporting
//!
//! This library fetches a brokerage account's portfolio positions and
//! operation history from the T-Invest public REST API and writes them
//! into a formatted two-sheet Excel report.

pub mod api;
pub mod config;
pub mod convert;
pub mod error;
pub mod report;
