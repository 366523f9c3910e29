//! Stream lifecycle telemetry.

use cee_utils::ids::RequestId;

pub fn opened(request_id: &RequestId) {
    tracing::info!(event = "stream.opened", request_id = %request_id, "stream opened");
}

pub fn resumed(request_id: &RequestId, live: bool, replayed_count: usize) {
    tracing::info!(
        event = "stream.resumed",
        request_id = %request_id,
        live,
        replayed_count,
        "stream resume handshake served"
    );
}

pub fn resume_rejected(raw_token_prefix: &str, http_status: u16) {
    tracing::warn!(
        event = "stream.resume_rejected",
        token_prefix = raw_token_prefix,
        http_status,
        "resume token rejected"
    );
}

pub fn expired(request_id: &RequestId) {
    tracing::info!(event = "stream.expired", request_id = %request_id, "stream idle-expired and was torn down");
}

pub fn reconnect_scheduled(attempt: u32, delay_ms: u64) {
    tracing::info!(event = "stream.reconnect_scheduled", attempt, delay_ms, "client auto-reconnector scheduled a retry");
}
