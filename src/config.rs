use std::time::Duration;

/// Backend base URL, set at compile time.
/// Defaults to a local backend serving the `/api/v1` group.
pub const API_BASE_URL: &str = match option_env!("COINWAVE_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api/v1",
};

/// Per-request timeout on native targets. Browser fetch ignores it.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(API_BASE_URL),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
