use std::collections::BTreeMap;

use serde_json::{json, Value};
use widget_logging::{widget_debug, widget_warn};

use crate::view_model::{AppViewModel, DebugView};
use crate::{extract_company_overview, normalize_url, SummaryEndpoint};

pub type RequestId = u64;

/// Input shown when the widget is first mounted.
pub const DEFAULT_INPUT_URL: &str = "http://gabeecoffee.com";
pub const NO_SUMMARY_MESSAGE: &str = "No summary data available for this website";
pub const SUMMARY_NOT_TEXT_MESSAGE: &str = "summary_vector is not a string";
/// User-facing text for every failed submission.
pub const RETRY_LATER_MESSAGE: &str = "We are currently experiencing technical difficulties accessing the API. \
Our team has been notified and is working on resolving this issue. \
Please try again later.";
pub const CORS_NOTE: &str = "API access is currently restricted. \
Please ensure the API server has CORS enabled for this domain.";

/// Request URL and raw response kept for manual inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugRecord {
    pub request_url: String,
    pub response: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Succeeded {
        overview: String,
        debug: DebugRecord,
    },
    Failed {
        message: String,
        debug: DebugRecord,
    },
}

impl QueryStatus {
    pub fn debug_record(&self) -> Option<&DebugRecord> {
        match self {
            QueryStatus::Succeeded { debug, .. } | QueryStatus::Failed { debug, .. } => Some(debug),
            QueryStatus::Idle | QueryStatus::Loading => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    endpoint: SummaryEndpoint,
    input: String,
    status: QueryStatus,
    next_request_id: RequestId,
    in_flight: BTreeMap<RequestId, String>,
    debug_expanded: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_endpoint(SummaryEndpoint::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(endpoint: SummaryEndpoint) -> Self {
        Self {
            endpoint,
            input: DEFAULT_INPUT_URL.to_string(),
            status: QueryStatus::Idle,
            next_request_id: 1,
            in_flight: BTreeMap::new(),
            debug_expanded: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let is_loading = matches!(self.status, QueryStatus::Loading);
        let (error, overview) = match &self.status {
            QueryStatus::Succeeded { overview, .. } if !overview.is_empty() => {
                (None, Some(overview.clone()))
            }
            QueryStatus::Failed { message, .. } => (Some(message.clone()), None),
            _ => (None, None),
        };
        let debug = self.status.debug_record().map(|record| DebugView {
            request_url: record.request_url.clone(),
            response_pretty: serde_json::to_string_pretty(&record.response)
                .unwrap_or_else(|_| record.response.to_string()),
        });

        AppViewModel {
            input: self.input.clone(),
            is_loading,
            submit_enabled: !is_loading,
            error,
            overview,
            debug,
            debug_expanded: self.debug_expanded,
            in_flight: self.in_flight.len(),
            dirty: self.dirty,
        }
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_debug(&mut self) {
        self.debug_expanded = !self.debug_expanded;
        self.mark_dirty();
    }

    /// Resets the query and registers a new in-flight request.
    /// Blank input is refused the way a required form field would be.
    pub(crate) fn begin_submission(&mut self) -> Option<(RequestId, String)> {
        if self.input.trim().is_empty() {
            return None;
        }

        let target = normalize_url(&self.input);
        let request_url = self.endpoint.request_url(&target);
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        self.status = QueryStatus::Loading;
        self.in_flight.insert(request_id, request_url.clone());
        self.mark_dirty();
        Some((request_id, request_url))
    }

    /// Applies a finished request. Results are never discarded, even when a
    /// newer submission has started since.
    pub(crate) fn apply_completion(&mut self, request_id: RequestId, result: Result<Value, String>) {
        let request_url = match self.in_flight.remove(&request_id) {
            Some(url) => url,
            None => {
                widget_warn!("Completion for unknown request {}", request_id);
                String::new()
            }
        };

        self.status = match result.and_then(|body| {
            let overview = summary_text(&body).map(extract_company_overview)?;
            Ok((overview, body))
        }) {
            Ok((overview, body)) => {
                widget_debug!("Request {} succeeded", request_id);
                QueryStatus::Succeeded {
                    overview,
                    debug: DebugRecord {
                        request_url,
                        response: body,
                    },
                }
            }
            Err(reason) => {
                widget_warn!("Request {} failed: {}", request_id, reason);
                QueryStatus::Failed {
                    message: RETRY_LATER_MESSAGE.to_string(),
                    debug: DebugRecord {
                        request_url,
                        response: json!({ "error": reason, "note": CORS_NOTE }),
                    },
                }
            }
        };
        self.mark_dirty();
    }
}

fn summary_text(body: &Value) -> Result<&str, String> {
    match body.get("summary_vector") {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        None | Some(Value::Null) | Some(Value::String(_)) | Some(Value::Bool(false)) => {
            Err(NO_SUMMARY_MESSAGE.to_string())
        }
        Some(_) => Err(SUMMARY_NOT_TEXT_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_text_requires_non_empty_string() {
        assert_eq!(summary_text(&json!({"summary_vector": "x"})), Ok("x"));
        assert_eq!(
            summary_text(&json!({"summary_vector": ""})),
            Err(NO_SUMMARY_MESSAGE.to_string())
        );
        assert_eq!(
            summary_text(&json!({"summary_vector": null})),
            Err(NO_SUMMARY_MESSAGE.to_string())
        );
        assert_eq!(summary_text(&json!([1, 2])), Err(NO_SUMMARY_MESSAGE.to_string()));
        assert_eq!(
            summary_text(&json!({"summary_vector": {"a": 1}})),
            Err(SUMMARY_NOT_TEXT_MESSAGE.to_string())
        );
    }

    #[test]
    fn blank_input_is_not_submitted() {
        let mut state = AppState::new();
        state.set_input("   ".to_string());
        assert!(state.begin_submission().is_none());
        assert_eq!(state.status(), &QueryStatus::Idle);
    }

    #[test]
    fn request_ids_increase_per_submission() {
        let mut state = AppState::new();
        let (first, _) = state.begin_submission().unwrap();
        let (second, _) = state.begin_submission().unwrap();
        assert_eq!((first, second), (1, 2));
        assert_eq!(state.view().in_flight, 2);
    }
}
