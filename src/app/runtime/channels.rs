use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::sources::GeolocationError;
use crate::state::{Coordinate, SearchRequest, SearchResults};

/// Result delivered once by the geolocation worker.
pub type GeolocationResult = Result<Coordinate, GeolocationError>;

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - The event loop owns every receiver; workers get sender clones.
pub struct Channels {
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    pub event_thread_cancelled: Arc<AtomicBool>,
    pub geo_tx: mpsc::UnboundedSender<GeolocationResult>,
    pub geo_rx: mpsc::UnboundedReceiver<GeolocationResult>,
    pub search_req_tx: mpsc::UnboundedSender<SearchRequest>,
    /// Taken by the search worker when it is spawned.
    pub search_req_rx: Option<mpsc::UnboundedReceiver<SearchRequest>>,
    pub search_result_tx: mpsc::UnboundedSender<SearchResults>,
    pub results_rx: mpsc::UnboundedReceiver<SearchResults>,
}

impl Channels {
    /// Create all channels.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (geo_tx, geo_rx) = mpsc::unbounded_channel();
        let (search_req_tx, search_req_rx) = mpsc::unbounded_channel();
        let (search_result_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            event_tx,
            event_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
            geo_tx,
            geo_rx,
            search_req_tx,
            search_req_rx: Some(search_req_rx),
            search_result_tx,
            results_rx,
        }
    }
}
