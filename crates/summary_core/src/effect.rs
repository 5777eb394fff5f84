use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one GET against the summary endpoint.
    FetchSummary {
        request_id: RequestId,
        request_url: String,
    },
}
