//! Envelope success/failure telemetry.

pub fn success(request_id: &str, http_status: u16, has_validation_issues: bool) {
    tracing::info!(
        event = "envelope.success",
        request_id,
        http_status,
        has_validation_issues,
        "response envelope finalised"
    );
}

pub fn failure(request_id: &str, http_status: u16, error_code: &str) {
    tracing::warn!(
        event = "envelope.failure",
        request_id,
        http_status,
        error_code,
        "response envelope finalised with an error"
    );
}
