//! Stream event types and their SSE wire rendering.

use serde::Serialize;

/// One event in a stream's ordered sequence. Heartbeats carry no sequence
/// number and are never buffered for replay.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum StreamEvent {
    /// A pipeline-stage progress update, e.g. `{stage: "DRAFTING"}`.
    Stage {
        seq: u64,
        stage: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<serde_json::Value>,
    },
    /// Always event 1: carries the signed resume token for this stream.
    Resume { seq: u64, token: String },
    /// Terminal event; the server closes the connection after sending this.
    Complete { seq: u64 },
}

impl StreamEvent {
    #[must_use]
    pub const fn seq(&self) -> u64 {
        match self {
            Self::Stage { seq, .. } | Self::Resume { seq, .. } | Self::Complete { seq } => *seq,
        }
    }

    /// A `stage {stage: "COMPLETE"}` event or a bare `complete` event both
    /// count as terminal ("Terminal events are `stage {stage:
    /// COMPLETE}` or `complete`").
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. }) || matches!(self, Self::Stage { stage, .. } if stage == "COMPLETE")
    }

    /// Render as `event: <type>\ndata: <json>\n\n`, the SSE wire format.
    #[must_use]
    pub fn to_sse(&self) -> String {
        let (event_name, data) = match self {
            Self::Stage { stage, payload, .. } => {
                let mut data = serde_json::json!({ "stage": stage });
                if let Some(p) = payload {
                    data["payload"] = p.clone();
                }
                ("stage", data)
            }
            Self::Resume { token, .. } => ("resume", serde_json::json!({ "token": token })),
            Self::Complete { .. } => ("complete", serde_json::json!({})),
        };
        format!("event: {event_name}\ndata: {data}\n\n")
    }
}

/// A heartbeat comment line, carries no sequence number and is never
/// buffered.
#[must_use]
pub fn heartbeat_sse(text: &str) -> String {
    format!(": {text}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_complete_is_terminal() {
        let event = StreamEvent::Stage { seq: 5, stage: "COMPLETE".to_string(), payload: None };
        assert!(event.is_terminal());
    }

    #[test]
    fn bare_complete_is_terminal() {
        assert!(StreamEvent::Complete { seq: 5 }.is_terminal());
    }

    #[test]
    fn in_progress_stage_is_not_terminal() {
        let event = StreamEvent::Stage { seq: 2, stage: "DRAFTING".to_string(), payload: None };
        assert!(!event.is_terminal());
    }

    #[test]
    fn resume_event_renders_its_token_in_the_data_line() {
        let event = StreamEvent::Resume { seq: 1, token: "tok-abc".to_string() };
        let sse = event.to_sse();
        assert!(sse.starts_with("event: resume\n"));
        assert!(sse.contains("\"token\":\"tok-abc\"") || sse.contains("\"token\": \"tok-abc\""));
        assert!(sse.ends_with("\n\n"));
    }

    #[test]
    fn heartbeat_is_a_comment_line() {
        assert_eq!(heartbeat_sse("ping"), ": ping\n");
    }
}
