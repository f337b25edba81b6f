use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use super::channels::GeolocationResult;
use crate::sources::{Geolocator, PlaceSearch};
use crate::state::{SearchRequest, SearchResults};

/// What: Spawn the blocking terminal event reader.
///
/// Inputs:
/// - `event_tx`: Channel for terminal events.
/// - `cancelled`: Flag set by the event loop on exit.
///
/// Details:
/// - Polls with a 50ms timeout so the flag is checked regularly.
/// - Exits when the flag is set or the receiver is gone.
pub fn spawn_event_thread(event_tx: mpsc::UnboundedSender<CEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            match crossterm::event::poll(std::time::Duration::from_millis(50)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::debug!(error = %e, "transient terminal read error"),
                },
                Ok(false) => {}
                Err(e) => tracing::debug!(error = %e, "terminal poll error"),
            }
        }
        tracing::debug!("event thread exited");
    });
}

/// What: Spawn the one-shot geolocation lookup.
///
/// Inputs:
/// - `locator`: Position provider chosen from settings.
/// - `geo_tx`: Channel receiving the single result.
pub fn spawn_geolocation_worker(
    locator: Box<dyn Geolocator>,
    geo_tx: mpsc::UnboundedSender<GeolocationResult>,
) {
    tokio::spawn(async move {
        let result = locator.locate().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "geolocation failed");
        }
        let _ = geo_tx.send(result);
    });
}

/// What: Spawn the search worker.
///
/// Inputs:
/// - `req_rx`: Requests from the event loop.
/// - `result_tx`: Outcomes back to the event loop.
/// - `client`: Shared places client.
///
/// Details:
/// - Every request runs in its own task, so searches may overlap and land in any order.
/// - No debouncing: the trigger is an explicit user action.
pub fn spawn_search_worker<C>(
    mut req_rx: mpsc::UnboundedReceiver<SearchRequest>,
    result_tx: mpsc::UnboundedSender<SearchResults>,
    client: Arc<C>,
) where
    C: PlaceSearch + Send + Sync + 'static,
{
    tokio::spawn(async move {
        while let Some(request) = req_rx.recv().await {
            let client = Arc::clone(&client);
            let tx = result_tx.clone();
            tokio::spawn(async move {
                let outcome = client
                    .search(request.coordinate, request.query.as_deref())
                    .await;
                tracing::debug!(
                    id = request.id,
                    results = outcome.results().len(),
                    failed = outcome.error().is_some(),
                    "search finished"
                );
                let _ = tx.send(SearchResults {
                    id: request.id,
                    outcome,
                });
            });
        }
        tracing::debug!("search worker exited");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::geolocation::FixedLocation;
    use crate::state::{Coordinate, PlaceResult, SearchOutcome};

    struct EchoSearch;

    impl PlaceSearch for EchoSearch {
        async fn search(&self, coordinate: Coordinate, query: Option<&str>) -> SearchOutcome {
            SearchOutcome::Found(vec![PlaceResult {
                name: query.unwrap_or("nearby").to_string(),
                coordinate,
                address: None,
                categories: None,
            }])
        }
    }

    #[tokio::test]
    /// What: Every request yields exactly one outcome tagged with its id.
    ///
    /// Inputs:
    /// - Two requests sent to a worker backed by an echoing client.
    ///
    /// Output:
    /// - Two outcomes whose ids match the requests.
    async fn search_worker_answers_each_request() {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (res_tx, mut res_rx) = mpsc::unbounded_channel();
        spawn_search_worker(req_rx, res_tx, Arc::new(EchoSearch));
        for id in [1, 2] {
            req_tx
                .send(SearchRequest {
                    id,
                    coordinate: Coordinate::new(1.0, 2.0),
                    query: Some(format!("q{id}")),
                })
                .expect("send");
        }
        let mut ids = vec![
            res_rx.recv().await.expect("first").id,
            res_rx.recv().await.expect("second").id,
        ];
        ids.sort_unstable();
        assert_eq!(ids, [1, 2]);
    }

    #[tokio::test]
    /// What: The geolocation worker delivers the provider's result once.
    async fn geolocation_worker_delivers_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_geolocation_worker(Box::new(FixedLocation(Coordinate::new(3.0, 4.0))), tx);
        let got = rx.recv().await.expect("result");
        assert_eq!(got.ok(), Some(Coordinate::new(3.0, 4.0)));
        assert!(rx.recv().await.is_none());
    }
}
