use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use widget_logging::widget_debug;

use crate::fetch::{FetchSettings, ReqwestSummaryFetcher, SummaryFetcher};
use crate::{EngineEvent, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine: {0}")]
    Startup(#[from] std::io::Error),
}

enum EngineCommand {
    Fetch { request_id: RequestId, request_url: String },
}

/// Runs summary requests on a dedicated thread with its own tokio runtime.
/// Requests are never cancelled; every one produces exactly one event.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        Self::with_fetcher(Arc::new(ReqwestSummaryFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn SummaryFetcher>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("summary-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn fetch(&self, request_id: RequestId, request_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            request_url: request_url.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Blocks until the next event. Returns `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }
}

async fn handle_command(
    fetcher: &dyn SummaryFetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch {
            request_id,
            request_url,
        } => {
            let result = fetcher.fetch(&request_url).await;
            widget_debug!("Request {} finished ok={}", request_id, result.is_ok());
            let _ = event_tx.send(EngineEvent::SummaryCompleted { request_id, result });
        }
    }
}
