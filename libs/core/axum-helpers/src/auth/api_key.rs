use subtle::ConstantTimeEq;

use super::ApiKeyConfig;

/// Decides whether the raw `x-api-key` header value grants access.
///
/// `None` means the header was absent or not valid UTF-8.
pub trait ApiKeyVerifier: Send + Sync {
    fn validate(&self, header: Option<&str>) -> bool;
}

/// Compares the header against a single configured key.
#[derive(Clone)]
pub struct StaticApiKey {
    key: String,
}

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl From<&ApiKeyConfig> for StaticApiKey {
    fn from(config: &ApiKeyConfig) -> Self {
        Self::new(config.key.clone())
    }
}

impl std::fmt::Debug for StaticApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticApiKey").field("key", &"<redacted>").finish()
    }
}

impl ApiKeyVerifier for StaticApiKey {
    fn validate(&self, header: Option<&str>) -> bool {
        match header {
            Some(candidate) => bool::from(candidate.as_bytes().ct_eq(self.key.as_bytes())),
            None => false,
        }
    }
}
