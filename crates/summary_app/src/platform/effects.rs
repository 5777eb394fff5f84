use std::sync::mpsc;
use std::thread;

use summary_core::{Effect, Msg};
use summary_engine::{EngineError, EngineEvent, EngineHandle, FetchSettings};
use widget_logging::{widget_info, widget_warn};

use super::input::AppEvent;

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, event_tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx)?;
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchSummary {
                    request_id,
                    request_url,
                } => {
                    widget_info!("FetchSummary request_id={} url={}", request_id, request_url);
                    self.engine.fetch(request_id, request_url);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) -> Result<(), EngineError> {
        let engine = self.engine.clone();
        thread::Builder::new()
            .name("summary-events".to_string())
            .spawn(move || {
                while let Some(event) = engine.recv() {
                    if event_tx.send(AppEvent::Core(completion_msg(event))).is_err() {
                        break;
                    }
                }
            })?;
        Ok(())
    }
}

/// Converts an engine completion into the core message, keeping only the
/// response body or the underlying error text.
pub fn completion_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SummaryCompleted { request_id, result } => {
            let result = match result {
                Ok(response) => {
                    widget_info!(
                        "Request {} answered status={} bytes={}",
                        request_id,
                        response.status,
                        response.metadata.byte_len
                    );
                    Ok(response.body)
                }
                Err(err) => {
                    widget_warn!("Request {} failed ({}): {}", request_id, err.kind, err);
                    Err(err.message)
                }
            };
            Msg::SummaryReceived { request_id, result }
        }
    }
}
