use std::path::PathBuf;

/// Application configuration, loaded from environment variables.
///
/// Every field has a default; the geocoding credential is optional and its
/// absence silently disables the enhanced provider.
#[derive(Clone)]
pub struct AppConfig {
    /// LocationIQ API token. `None` means only the community provider is used.
    pub locationiq_token: Option<String>,
    pub geocode_timeout_secs: u64,
    pub geocode_max_retries: u32,
    pub geocode_retry_backoff_ms: u64,
    pub user_agent: String,
    pub optimizer_url: String,
    pub optimizer_timeout_secs: u64,
    pub log_level: String,
    pub warehouse_path: PathBuf,
    pub suggest_debounce_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "locationiq_token",
                &self.locationiq_token.as_ref().map(|_| "[redacted]"),
            )
            .field("geocode_timeout_secs", &self.geocode_timeout_secs)
            .field("geocode_max_retries", &self.geocode_max_retries)
            .field("geocode_retry_backoff_ms", &self.geocode_retry_backoff_ms)
            .field("user_agent", &self.user_agent)
            .field("optimizer_url", &self.optimizer_url)
            .field("optimizer_timeout_secs", &self.optimizer_timeout_secs)
            .field("log_level", &self.log_level)
            .field("warehouse_path", &self.warehouse_path)
            .field("suggest_debounce_ms", &self.suggest_debounce_ms)
            .finish()
    }
}
