//! Website summary core: pure state machine, URL normalization and overview
//! extraction.
mod effect;
mod endpoint;
mod msg;
mod normalize;
mod overview;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use endpoint::{EndpointError, SummaryEndpoint, DEFAULT_ENDPOINT};
pub use msg::Msg;
pub use normalize::normalize_url;
pub use overview::{
    extract_company_overview, OVERVIEW_END_MARKER, OVERVIEW_NOT_FOUND, OVERVIEW_START_MARKER,
};
pub use state::{
    AppState, DebugRecord, QueryStatus, RequestId, CORS_NOTE, DEFAULT_INPUT_URL,
    NO_SUMMARY_MESSAGE, RETRY_LATER_MESSAGE, SUMMARY_NOT_TEXT_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, DebugView};
