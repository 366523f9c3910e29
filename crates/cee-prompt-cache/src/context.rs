/// Carries the identifiers the experiment bucketing key is built from
/// (`"{experimentName}:{userId|keyId|requestId|'anonymous'}"`).
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    pub user_id: Option<String>,
    pub key_id: Option<String>,
    pub request_id: Option<String>,
}

impl ResolutionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// First of `user_id`, `key_id`, `request_id` that is set, else
    /// `"anonymous"`.
    #[must_use]
    pub fn bucketing_key(&self) -> &str {
        self.user_id
            .as_deref()
            .or(self.key_id.as_deref())
            .or(self.request_id.as_deref())
            .unwrap_or("anonymous")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_anonymous() {
        assert_eq!(ResolutionContext::new().bucketing_key(), "anonymous");
    }

    #[test]
    fn prefers_user_id_over_key_and_request() {
        let ctx = ResolutionContext::new()
            .with_user_id("u1")
            .with_key_id("k1")
            .with_request_id("r1");
        assert_eq!(ctx.bucketing_key(), "u1");
    }

    #[test]
    fn falls_back_to_key_id_then_request_id() {
        let ctx = ResolutionContext::new().with_key_id("k1").with_request_id("r1");
        assert_eq!(ctx.bucketing_key(), "k1");

        let ctx = ResolutionContext::new().with_request_id("r1");
        assert_eq!(ctx.bucketing_key(), "r1");
    }
}
