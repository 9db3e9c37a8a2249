use std::env;
use std::time::Duration;

use crate::models::ResponseFormat;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_SESSION_IDLE_MINUTES: u64 = 30;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub log_json: bool,
    pub session_idle_minutes: Option<u64>,
    pub openai: Option<OpenAiConfig>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_key: None,
            base_url: None,
            model: None,
            response_format: None,
        }
    }
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY").ok();
        let base_url = env::var("OPENAI_BASE_URL").ok();
        let model = env::var("OPENAI_IMAGE_MODEL").ok();
        let response_format = env::var("OPENAI_RESPONSE_FORMAT")
            .ok()
            .and_then(|s| ResponseFormat::from_str(&s));

        OpenAiConfig {
            api_key,
            base_url,
            model,
            response_format,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            host: None,
            log_json: false,
            session_idle_minutes: None,
            openai: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let host = env::var("HOST").ok();
        let log_json = env::var("LOG_JSON").ok().map_or(false, |val| val == "true");
        let session_idle_minutes = env::var("SESSION_IDLE_MINUTES")
            .ok()
            .and_then(|val| val.parse().ok());

        Config {
            port,
            host,
            log_json,
            session_idle_minutes,
            openai: Some(OpenAiConfig::from_env()),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_session_idle_minutes(mut self, minutes: u64) -> Self {
        self.session_idle_minutes = Some(minutes);
        self
    }

    pub fn with_openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = Some(config);
        self
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// How long a session may sit unused before it is dropped.
    pub fn session_idle_timeout(&self) -> Duration {
        let minutes = self
            .session_idle_minutes
            .unwrap_or(DEFAULT_SESSION_IDLE_MINUTES);
        Duration::from_secs(minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openai() {
        let config = OpenAiConfig::new();
        assert_eq!(config.base_url(), "https://api.openai.com/v1");
        assert_eq!(config.model(), "dall-e-3");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn builder_overrides_and_trims_base_url() {
        let config = OpenAiConfig::new()
            .with_api_key("sk-test")
            .with_base_url("http://127.0.0.1:9000/v1/")
            .with_model("dall-e-2")
            .with_response_format(ResponseFormat::B64Json);

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url(), "http://127.0.0.1:9000/v1");
        assert_eq!(config.model(), "dall-e-2");
        assert_eq!(config.response_format, Some(ResponseFormat::B64Json));
    }

    #[test]
    fn server_defaults() {
        let config = Config::new();
        assert_eq!(config.port(), 8501);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(1800));

        let config = config
            .with_port(9090)
            .with_host("0.0.0.0")
            .with_session_idle_minutes(5);
        assert_eq!(config.port(), 9090);
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(300));
    }
}
