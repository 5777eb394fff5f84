use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input.
    Submitted,
    /// Engine completion for a summary request. `Err` carries the underlying
    /// failure text (transport, size limit or JSON parse).
    SummaryReceived {
        request_id: crate::RequestId,
        result: Result<Value, String>,
    },
    /// User expanded or collapsed the debug panel.
    DebugToggled,
}
