use crate::{GenerateRequest, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchEndpoints,
    FetchStarCount,
    CancelStarCount,
    /// `endpoint` is the raw user input; the render client normalizes it.
    Generate {
        request_id: RequestId,
        endpoint: String,
        request: GenerateRequest,
    },
    CopyToClipboard(String),
}
