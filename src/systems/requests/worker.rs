use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, trace};
use usersearch_api::SearchBackend;

use super::commands::{RequestCommand, RequestResponse};
use crate::systems::download;

/// Launches a background request worker thread and returns communication channels.
///
/// The returned counter holds the most recently issued search token. Queued
/// searches older than it are skipped without contacting the backend.
pub(crate) fn spawn(
    backend: Arc<dyn SearchBackend>,
) -> (
    Sender<RequestCommand>,
    Receiver<RequestResponse>,
    Arc<AtomicU64>,
) {
    let (command_tx, command_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();
    let latest_id = Arc::new(AtomicU64::new(0));
    let thread_latest = Arc::clone(&latest_id);

    thread::spawn(move || worker_loop(backend.as_ref(), command_rx, result_tx, thread_latest));

    (command_tx, result_rx, latest_id)
}

fn worker_loop(
    backend: &dyn SearchBackend,
    command_rx: Receiver<RequestCommand>,
    result_tx: Sender<RequestResponse>,
    latest_id: Arc<AtomicU64>,
) {
    while let Ok(command) = command_rx.recv() {
        if !handle_command(backend, &result_tx, &latest_id, command) {
            break;
        }
    }
    trace!("request worker stopped");
}

fn handle_command(
    backend: &dyn SearchBackend,
    result_tx: &Sender<RequestResponse>,
    latest_id: &AtomicU64,
    command: RequestCommand,
) -> bool {
    match command {
        RequestCommand::Search { id, request } => {
            if id < latest_id.load(Ordering::Acquire) {
                debug!(id, "skipping superseded search");
                return true;
            }
            debug!(id, query = %request.query, page = request.page, "running search");
            let outcome = backend.search(&request);
            result_tx
                .send(RequestResponse::Search {
                    id,
                    page: request.page,
                    outcome,
                })
                .is_ok()
        }
        RequestCommand::Download {
            id,
            request,
            target,
        } => {
            debug!(id, query = %request.query, target = %target.display(), "running download");
            let outcome = download::fetch_to_file(backend, &request, &target);
            result_tx
                .send(RequestResponse::Download { id, outcome })
                .is_ok()
        }
        RequestCommand::Shutdown => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use usersearch_api::{DownloadRequest, SearchRequest};

    use crate::testing::StaticBackend;

    #[test]
    fn shutdown_command_stops_worker() {
        let (tx, rx, latest) = spawn(Arc::new(StaticBackend::with_users(0)));
        assert_eq!(latest.load(Ordering::Relaxed), 0);
        tx.send(RequestCommand::Shutdown).unwrap();
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(1)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }

    #[test]
    fn search_results_are_forwarded_with_their_token() {
        let (tx, rx, latest) = spawn(Arc::new(StaticBackend::with_users(20)));
        latest.store(1, Ordering::Release);
        tx.send(RequestCommand::Search {
            id: 1,
            request: SearchRequest::new("", 2),
        })
        .unwrap();

        let response = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        match response {
            RequestResponse::Search { id, page, outcome } => {
                assert_eq!(id, 1);
                assert_eq!(page, 2);
                let page = outcome.unwrap();
                assert_eq!(page.total, 20);
                assert_eq!(page.results.len(), 5);
                assert_eq!(page.results[0].user_id, "u-16");
            }
            other => panic!("unexpected response: {other:?}"),
        }

        tx.send(RequestCommand::Shutdown).unwrap();
    }

    #[test]
    fn superseded_searches_are_skipped() {
        let backend = Arc::new(StaticBackend::with_users(3));
        let (tx, rx, latest) = spawn(backend.clone());
        latest.store(2, Ordering::Release);

        tx.send(RequestCommand::Search {
            id: 1,
            request: SearchRequest::new("stale", 1),
        })
        .unwrap();
        tx.send(RequestCommand::Search {
            id: 2,
            request: SearchRequest::new("fresh", 1),
        })
        .unwrap();

        let response = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(response.id(), 2);
        tx.send(RequestCommand::Shutdown).unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_err());

        let searches = backend.searches.lock().unwrap();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].query, "fresh");
    }

    #[test]
    fn downloads_are_written_to_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("user_results.json");
        let (tx, rx, _) = spawn(Arc::new(StaticBackend::with_users(4)));

        tx.send(RequestCommand::Download {
            id: 1,
            request: DownloadRequest::new("user"),
            target: target.clone(),
        })
        .unwrap();

        match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
            RequestResponse::Download { id, outcome } => {
                assert_eq!(id, 1);
                let saved = outcome.unwrap();
                assert_eq!(saved.path, target);
            }
            other => panic!("unexpected response: {other:?}"),
        }
        assert_eq!(
            std::fs::read_to_string(&target).unwrap().lines().count(),
            4
        );

        tx.send(RequestCommand::Shutdown).unwrap();
    }
}
