use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use tracing::warn;
use usersearch_api::SearchBackend;

use crate::systems::requests::{self, RequestCommand, RequestResponse};

/// UI-side handle to one request worker.
///
/// Every issued request gets a fresh token; only the response carrying the
/// latest token is considered current.
pub(crate) struct RequestRuntime {
    tx: Sender<RequestCommand>,
    rx: Receiver<RequestResponse>,
    latest_id: Arc<AtomicU64>,
    next_id: u64,
    current_id: Option<u64>,
    in_flight: bool,
}

impl RequestRuntime {
    pub(crate) fn spawn(backend: Arc<dyn SearchBackend>) -> Self {
        let (tx, rx, latest_id) = requests::spawn(backend);
        Self {
            tx,
            rx,
            latest_id,
            next_id: 0,
            current_id: None,
            in_flight: false,
        }
    }

    pub(crate) fn shutdown(&self) {
        let _ = self.tx.send(RequestCommand::Shutdown);
    }

    /// Send the command produced by `build` under a new token and return it.
    pub(crate) fn issue(&mut self, build: impl FnOnce(u64) -> RequestCommand) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        let id = self.next_id;
        self.current_id = Some(id);
        self.in_flight = true;
        self.latest_id.store(id, AtomicOrdering::Release);
        if self.tx.send(build(id)).is_err() {
            warn!(id, "request worker is gone; request dropped");
        }
        id
    }

    pub(crate) fn matches_latest(&self, id: u64) -> bool {
        Some(id) == self.current_id
    }

    pub(crate) fn record_completion(&mut self) {
        self.in_flight = false;
    }

    pub(crate) fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn try_recv(&mut self) -> Result<RequestResponse, TryRecvError> {
        self.rx.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usersearch_api::SearchRequest;

    use crate::testing::StaticBackend;

    #[test]
    fn tokens_increase_and_only_latest_matches() {
        let mut runtime = RequestRuntime::spawn(Arc::new(StaticBackend::with_users(1)));
        assert!(!runtime.is_in_flight());

        let first = runtime.issue(|id| RequestCommand::Search {
            id,
            request: SearchRequest::new("a", 1),
        });
        let second = runtime.issue(|id| RequestCommand::Search {
            id,
            request: SearchRequest::new("ab", 1),
        });

        assert!(second > first);
        assert!(runtime.is_in_flight());
        assert!(!runtime.matches_latest(first));
        assert!(runtime.matches_latest(second));
        assert_eq!(runtime.latest_id.load(AtomicOrdering::Acquire), second);

        runtime.record_completion();
        assert!(!runtime.is_in_flight());
        runtime.shutdown();
    }
}
