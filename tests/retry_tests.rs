// SPDX-License-Identifier: MIT

//! Retry coordinator tests: exactly one refresh-and-retry cycle per request.

use fitbit_sleep_export::error::AppError;
use fitbit_sleep_export::services::sleep::with_auth_retry;
use std::cell::Cell;

#[tokio::test]
async fn test_success_on_first_attempt_skips_refresh() {
    let attempts = Cell::new(0u32);
    let refreshes = Cell::new(0u32);

    let result = with_auth_retry(
        || {
            attempts.set(attempts.get() + 1);
            async { Ok::<_, AppError>(vec![1, 2, 3]) }
        },
        || {
            refreshes.set(refreshes.get() + 1);
            async { Ok(()) }
        },
    )
    .await;

    assert_eq!(result.unwrap(), vec![1, 2, 3]);
    assert_eq!(attempts.get(), 1);
    assert_eq!(refreshes.get(), 0);
}

#[tokio::test]
async fn test_retry_once_after_refresh() {
    // AuthExpired, then a successful refresh, then a successful fetch:
    // the coordinator returns the second fetch's data, one refresh total.
    let attempts = Cell::new(0u32);
    let refreshes = Cell::new(0u32);

    let result = with_auth_retry(
        || {
            let n = attempts.get();
            attempts.set(n + 1);
            async move {
                if n == 0 {
                    Err(AppError::AuthExpired)
                } else {
                    Ok(vec![10, 20])
                }
            }
        },
        || {
            refreshes.set(refreshes.get() + 1);
            async { Ok(()) }
        },
    )
    .await;

    assert_eq!(result.unwrap(), vec![10, 20]);
    assert_eq!(attempts.get(), 2);
    assert_eq!(refreshes.get(), 1);
}

#[tokio::test]
async fn test_second_auth_expired_is_terminal() {
    // AuthExpired twice in a row: terminal error, refresh runs only once.
    let attempts = Cell::new(0u32);
    let refreshes = Cell::new(0u32);

    let result: Result<Vec<u32>, _> = with_auth_retry(
        || {
            attempts.set(attempts.get() + 1);
            async { Err(AppError::AuthExpired) }
        },
        || {
            refreshes.set(refreshes.get() + 1);
            async { Ok(()) }
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::Authorization(_))));
    assert_eq!(attempts.get(), 2);
    assert_eq!(refreshes.get(), 1);
}

#[tokio::test]
async fn test_refresh_failure_is_terminal_without_second_attempt() {
    let attempts = Cell::new(0u32);

    let result: Result<Vec<u32>, _> = with_auth_retry(
        || {
            attempts.set(attempts.get() + 1);
            async { Err(AppError::AuthExpired) }
        },
        || async { Err(AppError::Refresh("invalid refresh token".to_string())) },
    )
    .await;

    assert!(matches!(result, Err(AppError::Refresh(_))));
    assert_eq!(attempts.get(), 1);
}

#[tokio::test]
async fn test_non_auth_errors_pass_through_without_refresh() {
    let refreshes = Cell::new(0u32);

    let result: Result<Vec<u32>, _> = with_auth_retry(
        || async { Err(AppError::Fetch("HTTP 503".to_string())) },
        || {
            refreshes.set(refreshes.get() + 1);
            async { Ok(()) }
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::Fetch(_))));
    assert_eq!(refreshes.get(), 0);
}
