use crate::courts::Coordinates;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub geocoder_url: String,
    pub courts_api_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub default_center: Coordinates,
    pub default_count: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("geocoder_url", &self.geocoder_url)
            .field("courts_api_url", &self.courts_api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("default_center", &format_args!("{}", self.default_center))
            .field("default_count", &self.default_count)
            .finish()
    }
}
