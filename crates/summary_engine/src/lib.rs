//! Website summary engine: IO for the summary endpoint and effect execution.
mod engine;
mod fetch;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use fetch::{FetchSettings, ReqwestSummaryFetcher, SummaryFetcher};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, RequestId, SummaryResponse};
