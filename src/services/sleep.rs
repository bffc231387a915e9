// SPDX-License-Identifier: MIT

//! Pagination and retry logic for the sleep history fetch.
//!
//! Both pieces are generic over injected async closures so the sequencing
//! can be tested without a live Fitbit endpoint.

use crate::error::AppError;
use std::future::Future;

/// Drive an offset/limit paginated fetch to completion.
///
/// Requests pages at offsets 0, limit, 2*limit, ... and appends records in
/// server-returned order. The first page strictly shorter than `limit`
/// (including an immediately empty one) is treated as the last. Any error
/// aborts the whole fetch; partially accumulated records are discarded.
pub async fn fetch_all_pages<R, F, Fut>(limit: u32, mut fetch_page: F) -> Result<Vec<R>, AppError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<R>, AppError>>,
{
    let mut records = Vec::new();
    let mut offset = 0u32;

    loop {
        let page = fetch_page(offset).await?;
        let page_len = page.len() as u32;
        records.extend(page);

        // A short page signals end-of-data
        if page_len < limit {
            break;
        }
        offset += limit;
    }

    tracing::debug!(total = records.len(), "Pagination complete");
    Ok(records)
}

/// Run a fetch attempt with a retry budget of exactly one refresh.
///
/// States: first attempt -> (on `AuthExpired`) refresh -> second attempt.
/// A refresh failure is terminal, and a second `AuthExpired` is mapped to a
/// terminal authorization error instead of looping. Any other error passes
/// through unchanged.
pub async fn with_auth_retry<T, F, Fut, R, RFut>(mut attempt: F, refresh: R) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
    R: FnOnce() -> RFut,
    RFut: Future<Output = Result<(), AppError>>,
{
    match attempt().await {
        Err(AppError::AuthExpired) => {}
        other => return other,
    }

    tracing::info!("Access token expired mid-fetch, refreshing and retrying once");
    refresh().await?;

    match attempt().await {
        Err(AppError::AuthExpired) => {
            tracing::error!("Fetch still unauthorized after token refresh");
            Err(AppError::Authorization(
                "Fetch still unauthorized after token refresh; restart the flow at /auth"
                    .to_string(),
            ))
        }
        other => other,
    }
}
