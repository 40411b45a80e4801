//! Retries for catalog requests.
//!
//! Transport failures and 5xx answers are retried with a short linear
//! backoff. A 4xx answer means the endpoint or query is wrong and is
//! reported at once as a [`CatalogRequestError`].

use anyhow::Result;
use log::{debug, warn};
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

/// Attempts made for one catalog page before giving up.
pub const MAX_ATTEMPTS: usize = 3;

const BACKOFF_STEP: Duration = Duration::from_millis(250);

/// Catalog answers that another attempt will not change.
#[derive(Debug, PartialEq, Eq)]
pub enum CatalogRequestError {
    /// 404, usually a wrong `--catalog-url`
    EndpointNotFound,
    /// 429
    Throttled,
    /// Any other 4xx
    Rejected(StatusCode),
}

impl fmt::Display for CatalogRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogRequestError::EndpointNotFound => {
                write!(f, "Catalog endpoint not found, check the catalog URL")
            }
            CatalogRequestError::Throttled => {
                write!(f, "Catalog is throttling requests, try again later")
            }
            CatalogRequestError::Rejected(status) => {
                write!(f, "Catalog rejected the query with HTTP {}", status.as_u16())
            }
        }
    }
}

impl std::error::Error for CatalogRequestError {}

/// Map an `error_for_status()` failure: 4xx becomes a [`CatalogRequestError`],
/// anything else is passed through for [`with_retry`] to judge.
pub fn into_catalog_error(error: reqwest::Error) -> anyhow::Error {
    let rejected = match error.status() {
        Some(StatusCode::NOT_FOUND) => CatalogRequestError::EndpointNotFound,
        Some(StatusCode::TOO_MANY_REQUESTS) => CatalogRequestError::Throttled,
        Some(status) if status.is_client_error() => CatalogRequestError::Rejected(status),
        _ => return error.into(),
    };
    rejected.into()
}

/// Timeouts, connection failures, interrupted transfers and 5xx answers.
pub fn is_transient(error: &reqwest::Error) -> bool {
    match error.status() {
        Some(status) => status.is_server_error(),
        None => error.is_timeout() || error.is_connect() || error.is_request() || error.is_body(),
    }
}

fn should_retry(error: &anyhow::Error) -> bool {
    if error.downcast_ref::<CatalogRequestError>().is_some() {
        return false;
    }
    error
        .downcast_ref::<reqwest::Error>()
        .is_some_and(is_transient)
}

/// Run `operation` up to [`MAX_ATTEMPTS`] times while it fails transiently.
pub async fn with_retry<F, Fut, T>(operation_name: &str, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        let error = match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        if !should_retry(&error) {
            debug!("{}: giving up: {:#}", operation_name, error);
            return Err(error);
        }
        if attempt >= MAX_ATTEMPTS {
            return Err(error.context(format!(
                "{} failed after {} attempts",
                operation_name, MAX_ATTEMPTS
            )));
        }

        let delay = BACKOFF_STEP * attempt as u32;
        warn!(
            "{}: attempt {}/{} failed ({:#}), retrying in {:?}",
            operation_name, attempt, MAX_ATTEMPTS, error, delay
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
