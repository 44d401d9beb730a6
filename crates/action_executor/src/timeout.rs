//! Time limits for individual operations.
//!
//! The executor enforces no timeouts. Actions that need one wrap the
//! operation with [`with_timeout`] and treat expiry as an ordinary error.

use std::{future::Future, time::Duration};

use tracing::debug;

use crate::errors::{ActionError, ActionResult};

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;

/// Runs `future` to completion unless `limit` passes first.
///
/// # Errors
///
/// Returns `ActionError::Timeout` on expiry, otherwise whatever the future
/// itself returned.
pub async fn with_timeout<F, T>(limit: Duration, future: F) -> ActionResult<T>
where
    F: Future<Output = ActionResult<T>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            debug!(message = "Operation timed out", timeout_ms = timeout_ms);
            Err(ActionError::Timeout { timeout_ms })
        }
    }
}
