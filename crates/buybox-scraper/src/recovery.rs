//! Per-identifier recovery loop.
//!
//! ```text
//! Fetching ──page 200──────────▶ Success (extract + classify)
//!    │   ──page non-200───────▶ NoOffer
//!    │   ──empty / blocked────▶ Retry-Cycle ──renew session──▶ Fetching
//!    └── cycles exhausted ────▶ NeedsReprocess
//! ```

use buybox_core::{ClassifiedRecord, ProductId};

use crate::backoff::pause;
use crate::classify::classify;
use crate::extract::extract_merchant_info;
use crate::fetch::{safe_get, FetchOutcome};
use crate::session::SessionProvider;
use crate::settings::ResolverConfig;

const SUCCESS_STATUS: u16 = 200;

/// What one fetch cycle means for the recovery loop.
#[derive(Debug, PartialEq, Eq)]
enum CycleResult {
    /// No response, or a response with an empty body.
    Empty,
    Blocked(u16),
    /// Not blocked, but not a success status either.
    Rejected(u16),
    Page(String),
}

impl From<FetchOutcome> for CycleResult {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::TransportFailure => CycleResult::Empty,
            FetchOutcome::Blocked { body, .. } if body.is_empty() => CycleResult::Empty,
            FetchOutcome::Blocked { status, .. } => CycleResult::Blocked(status),
            FetchOutcome::Page { body, .. } if body.is_empty() => CycleResult::Empty,
            FetchOutcome::Page { status, .. } if status != SUCCESS_STATUS => {
                CycleResult::Rejected(status)
            }
            FetchOutcome::Page { body, .. } => CycleResult::Page(body),
        }
    }
}

/// Resolves one identifier to a record. Never fails: every failure mode is
/// encoded in the returned record's status.
///
/// Cycle `c` runs one fetch cycle on the worker's session, renewing it
/// first when `c > 0`. Empty and blocked cycles back off and retry until
/// `max_blocked_cycles` is reached, after which the identifier is marked
/// for reprocessing. A non-blocking, non-success status ends the loop at
/// once with `NoOffer`.
pub async fn resolve_one(
    id: &ProductId,
    sessions: &mut SessionProvider,
    config: &ResolverConfig,
) -> ClassifiedRecord {
    let url = config.product_url(id);
    let policy = &config.retry_policy;
    let cycle_limit = config.max_blocked_cycles;
    let worker = sessions.worker();

    for cycle in 0..=cycle_limit {
        let outcome = match sessions.get(cycle > 0) {
            Ok(session) => {
                safe_get(
                    session,
                    &url,
                    config.request_timeout,
                    config.retries_per_cycle,
                    policy,
                )
                .await
            }
            Err(err) => {
                tracing::warn!(
                    product_id = %id,
                    worker,
                    error = %err,
                    "could not build session"
                );
                FetchOutcome::TransportFailure
            }
        };
        let cycles_remain = cycle < cycle_limit;

        let delay = match CycleResult::from(outcome) {
            CycleResult::Empty => {
                tracing::debug!(product_id = %id, cycle, "empty response");
                policy.empty_cycle_delay(cycle)
            }
            CycleResult::Blocked(status) => {
                tracing::warn!(product_id = %id, cycle, status, "blocked");
                policy.blocked_cycle_delay(cycle)
            }
            CycleResult::Rejected(status) => {
                tracing::debug!(product_id = %id, status, "non-success status; no offer");
                return ClassifiedRecord::no_offer(id.clone());
            }
            CycleResult::Page(body) => {
                let info = extract_merchant_info(&body);
                let status = classify(&info.seller, &info.shipper);
                tracing::debug!(
                    product_id = %id,
                    seller = %info.seller,
                    shipper = %info.shipper,
                    %status,
                    "classified"
                );
                pause(policy.pacing_delay()).await;
                return ClassifiedRecord::new(id.clone(), info, status);
            }
        };

        if !cycles_remain {
            break;
        }
        tracing::debug!(
            product_id = %id,
            cycle,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "backing off before next cycle"
        );
        pause(delay).await;
    }

    tracing::warn!(
        product_id = %id,
        cycles = cycle_limit + 1,
        "recovery exhausted; needs reprocessing"
    );
    ClassifiedRecord::needs_reprocess(id.clone())
}
