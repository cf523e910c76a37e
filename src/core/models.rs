use serde::{Deserialize, Serialize};

/// One queued newsletter generation request, serialized through SQS from the
/// API Lambda to the Worker Lambda.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationTask {
    pub correlation_id: String,
    /// E.164 phone number of the requester; empty when the task came from
    /// the web surface with no delivery phone.
    pub from: String,
    pub topic: String,
    pub tone: String,
}
