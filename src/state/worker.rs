use crate::api::{FetchError, HolidayApi};
use crate::data::PaginatedResponse;
use crate::state::FetchTicket;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::error;

#[derive(Debug)]
pub struct FetchCompletion {
    pub token: u64,
    pub result: Result<PaginatedResponse, FetchError>,
}

/// Runs each ticket on its own thread and queues the completions for the
/// event loop. In-flight requests are never cancelled; the coordinator's
/// token check drops whatever arrives late.
pub struct FetchWorker {
    api: Arc<dyn HolidayApi>,
    tx: Sender<FetchCompletion>,
    rx: Receiver<FetchCompletion>,
}

impl FetchWorker {
    pub fn new(api: Arc<dyn HolidayApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        FetchWorker { api, tx, rx }
    }

    pub fn spawn(&self, ticket: FetchTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let token = ticket.token;
        let spawned = thread::Builder::new()
            .name(format!("holiday-fetch-{token}"))
            .spawn(move || {
                let result = api.fetch(&ticket.request);
                // The receiver only goes away when the app is shutting down.
                let _ = tx.send(FetchCompletion {
                    token: ticket.token,
                    result,
                });
            });
        if let Err(e) = spawned {
            error!(token, "failed to spawn fetch thread: {}", e);
            let _ = self.tx.send(FetchCompletion {
                token,
                result: Err(FetchError::Transport(format!("failed to spawn fetch thread: {e}"))),
            });
        }
    }

    /// Next finished fetch, if any, without blocking.
    pub fn try_next(&self) -> Option<FetchCompletion> {
        match self.rx.try_recv() {
            Ok(c) => Some(c),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn next_blocking(&self, timeout: std::time::Duration) -> Option<FetchCompletion> {
        self.rx.recv_timeout(timeout).ok()
    }
}
