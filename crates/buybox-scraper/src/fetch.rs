//! A single fetch cycle: bounded immediate retries on one session.

use std::time::Duration;

use crate::backoff::{pause, RetryPolicy};
use crate::block::is_blocked;
use crate::error::ScraperError;
use crate::session::Session;

/// Result of a fetch cycle. Transport faults are data here, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A response that did not look like a block.
    Page { status: u16, body: String },
    /// A response matching a soft-block signature.
    Blocked { status: u16, body: String },
    /// No response: connect error, timeout, or unreadable body.
    TransportFailure,
}

impl FetchOutcome {
    /// `true` when there is nothing to inspect: no response or an empty body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            FetchOutcome::Page { body, .. } | FetchOutcome::Blocked { body, .. } => {
                body.is_empty()
            }
            FetchOutcome::TransportFailure => true,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchOutcome::Page { status, .. } | FetchOutcome::Blocked { status, .. } => {
                Some(*status)
            }
            FetchOutcome::TransportFailure => None,
        }
    }
}

/// Performs up to `max_retries + 1` GETs of `url`, returning the first
/// response that is not blocked.
///
/// Between attempts the task sleeps for [`RetryPolicy::attempt_delay`]. When
/// every attempt fails, the last observed outcome is returned and the caller
/// decides what exhaustion means.
pub async fn safe_get(
    session: &Session,
    url: &str,
    timeout: Duration,
    max_retries: u32,
    policy: &RetryPolicy,
) -> FetchOutcome {
    let mut last = FetchOutcome::TransportFailure;

    for attempt in 0..=max_retries {
        match fetch_once(session, url, timeout).await {
            Ok((status, body)) => {
                if !is_blocked(Some(status), &body) {
                    return FetchOutcome::Page { status, body };
                }
                tracing::debug!(url, status, attempt, "possible soft block");
                last = FetchOutcome::Blocked { status, body };
            }
            Err(err) => {
                tracing::debug!(url, attempt, error = %err, "GET failed");
                last = FetchOutcome::TransportFailure;
            }
        }

        if attempt < max_retries {
            pause(policy.attempt_delay(attempt)).await;
        }
    }

    last
}

async fn fetch_once(
    session: &Session,
    url: &str,
    timeout: Duration,
) -> Result<(u16, String), ScraperError> {
    let response = session.client().get(url).timeout(timeout).send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}
