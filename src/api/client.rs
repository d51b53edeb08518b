//! Authenticated client for the T-Invest public REST API.
//!
//! The REST endpoints mirror the gRPC services: every call is a POST with
//! a JSON body to `tinkoff.public.invest.api.contract.v1.<Service/Method>`.
//! Transport and auth failures propagate to the caller; there is no retry
//! policy here.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;

use super::types::{
    Account, AccountsResponse, Instrument, InstrumentResponse, Operation, OperationsResponse,
    PortfolioResponse,
};

const BASE_URL: &str = "https://invest-public-api.tinkoff.ru/rest";
const API_NAMESPACE: &str = "tinkoff.public.invest.api.contract.v1";

/// Scoped session against the invest API.
///
/// Holds the authenticated HTTP client for the duration of one report run;
/// dropping the value releases the session.
pub struct InvestClient {
    http: Client,
    base_url: String,
}

impl InvestClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, BASE_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("API token contains characters not allowed in a header")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent("invest-report/0.1")
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        service_method: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/{}.{}", self.base_url, API_NAMESPACE, service_method);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", service_method))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "{} returned {}: {}",
                service_method,
                status,
                detail
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to decode {} response", service_method))
    }

    /// List the accounts available to the token.
    pub async fn get_accounts(&self) -> Result<Vec<Account>> {
        info!("Fetching account list");
        let response: AccountsResponse = self.call("UsersService/GetAccounts", json!({})).await?;
        Ok(response.accounts)
    }

    /// Fetch the current portfolio snapshot for an account.
    pub async fn get_portfolio(&self, account_id: &str) -> Result<PortfolioResponse> {
        info!("Fetching portfolio for account {}", account_id);
        self.call(
            "OperationsService/GetPortfolio",
            json!({ "accountId": account_id }),
        )
        .await
    }

    /// Fetch executed operations for an account over a time range.
    pub async fn get_operations(
        &self,
        account_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Operation>> {
        info!(
            "Fetching operations for account {} from {} to {}",
            account_id, from, to
        );
        let response: OperationsResponse = self
            .call(
                "OperationsService/GetOperations",
                json!({
                    "accountId": account_id,
                    "from": from.to_rfc3339_opts(SecondsFormat::Secs, true),
                    "to": to.to_rfc3339_opts(SecondsFormat::Secs, true),
                    "state": "OPERATION_STATE_EXECUTED",
                }),
            )
            .await?;
        Ok(response.operations)
    }

    /// Look up an instrument by its FIGI.
    pub async fn get_instrument_by_figi(&self, figi: &str) -> Result<Instrument> {
        let response: InstrumentResponse = self
            .call(
                "InstrumentsService/GetInstrumentBy",
                json!({
                    "idType": "INSTRUMENT_ID_TYPE_FIGI",
                    "classCode": "",
                    "id": figi,
                }),
            )
            .await?;
        response
            .instrument
            .ok_or_else(|| anyhow!("No instrument data for figi {}", figi))
    }
}
