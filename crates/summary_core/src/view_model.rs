#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub is_loading: bool,
    /// Affordance only; submissions are accepted while loading.
    pub submit_enabled: bool,
    pub error: Option<String>,
    /// Present only for a non-empty extracted overview.
    pub overview: Option<String>,
    pub debug: Option<DebugView>,
    pub debug_expanded: bool,
    pub in_flight: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugView {
    pub request_url: String,
    /// Response JSON, pretty printed with two-space indentation.
    pub response_pretty: String,
}
