//! Request generations
//!
//! A screen that re-issues the same query (typing in a search box, paging
//! quickly) must only apply the response to its most recent request. Each
//! request takes a [`Ticket`]; when its response arrives, it is kept only if
//! no newer ticket was issued in the meantime.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Identifies one request within a [`RequestGeneration`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Display for Ticket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared counter of issued requests; clones observe the same counter
#[derive(Clone, Debug, Default)]
pub struct RequestGeneration {
    latest: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest() == ticket.0
    }

    /// Supersede all outstanding tickets without starting a request
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Keep `result` only if `ticket` is still the latest
    pub fn settle<T>(&self, ticket: Ticket, result: ClientResult<T>) -> ClientResult<T> {
        let latest = self.latest();
        if latest != ticket.0 {
            debug!("Discarding response to request {} (latest #{})", ticket, latest);
            return Err(ClientError::Stale {
                ticket: ticket.0,
                latest,
            });
        }
        result
    }

    /// Issue a ticket, await `request`, and settle its result
    pub async fn run<T, F>(&self, request: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let ticket = self.issue();
        let result = request.await;
        self.settle(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let generation = RequestGeneration::new();
        let first = generation.issue();
        let second = generation.issue();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_eq!(second.value(), 2);

        assert!(matches!(
            generation.settle(first, Ok(1)),
            Err(ClientError::Stale {
                ticket: 1,
                latest: 2
            })
        ));
        assert_eq!(generation.settle(second, Ok(2)).unwrap(), 2);
    }

    #[test]
    fn test_stale_error_is_also_discarded() {
        let generation = RequestGeneration::new();
        let first = generation.issue();
        generation.issue();

        let result: ClientResult<()> =
            generation.settle(first, Err(ClientError::InvalidResponse("boom".to_string())));
        assert!(result.unwrap_err().is_stale());
    }

    #[test]
    fn test_invalidate_and_clones_share_counter() {
        let generation = RequestGeneration::new();
        let shared = generation.clone();
        let ticket = generation.issue();

        shared.invalidate();
        assert!(!generation.is_current(ticket));
        assert_eq!(generation.latest(), 2);
    }

    #[tokio::test]
    async fn test_run_settles_result() {
        let generation = RequestGeneration::new();
        let value = generation.run(async { Ok::<_, ClientError>(42) }).await;
        assert_eq!(value.unwrap(), 42);
    }
}
