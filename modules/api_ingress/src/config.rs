use serde::{Deserialize, Serialize};

/// HTTP host configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    #[serde(default)]
    pub cors_enabled: bool,
    /// Handler timeout; a request running longer gets 408.
    #[serde(default = "default_timeout_sec")]
    pub request_timeout_sec: u64,
    /// Largest accepted request body; larger bodies get 413.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_timeout_sec() -> u64 {
    30
}

fn default_body_limit() -> usize {
    16 * 1024 * 1024
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_string(),
            cors_enabled: false,
            request_timeout_sec: default_timeout_sec(),
            body_limit_bytes: default_body_limit(),
        }
    }
}
