use std::env;

pub const DEFAULT_GENERATION_URL: &str =
    "https://ark.cn-beijing.volces.com/api/v3/images/generations";
pub const DEFAULT_RECOGNITION_URL: &str =
    "https://ark.cn-beijing.volces.com/api/v3/chat/completions";
pub const DEFAULT_REMOVE_BG_URL: &str = "https://api.remove.bg/v1.0/removebg";

pub const DEFAULT_GENERATION_MODEL: &str = "ep-20251019174112-h5hsx";
pub const DEFAULT_RECOGNITION_MODEL: &str = "ep-20251019164857-h8lnj";

pub const DEFAULT_PORT: u16 = 8080;

/// 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Credentials and endpoints used by the HTTP transport. Nothing outside the
/// transport reads these.
#[derive(Clone)]
pub struct TransportConfig {
    pub ark_api_key: Option<String>,
    pub remove_bg_api_key: Option<String>,
    pub generation_url: String,
    pub recognition_url: String,
    pub remove_bg_url: String,
    pub timeout_secs: Option<u64>,
}

// Keys are never printed.
impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("ark_api_key", &self.ark_api_key.as_ref().map(|_| "***"))
            .field(
                "remove_bg_api_key",
                &self.remove_bg_api_key.as_ref().map(|_| "***"),
            )
            .field("generation_url", &self.generation_url)
            .field("recognition_url", &self.recognition_url)
            .field("remove_bg_url", &self.remove_bg_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            ark_api_key: None,
            remove_bg_api_key: None,
            generation_url: DEFAULT_GENERATION_URL.to_string(),
            recognition_url: DEFAULT_RECOGNITION_URL.to_string(),
            remove_bg_url: DEFAULT_REMOVE_BG_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ark_api_key = env::var("ARK_API_KEY").ok().filter(|s| !s.is_empty());
        let remove_bg_api_key = env::var("REMOVE_BG_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());
        let generation_url = env::var("ARK_GENERATION_URL").unwrap_or(defaults.generation_url);
        let recognition_url = env::var("ARK_CHAT_URL").unwrap_or(defaults.recognition_url);
        let remove_bg_url = env::var("REMOVE_BG_URL").unwrap_or(defaults.remove_bg_url);
        let timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        TransportConfig {
            ark_api_key,
            remove_bg_api_key,
            generation_url,
            recognition_url,
            remove_bg_url,
            timeout_secs,
        }
    }

    pub fn with_ark_key(mut self, api_key: impl Into<String>) -> Self {
        self.ark_api_key = Some(api_key.into());
        self
    }

    pub fn with_remove_bg_key(mut self, api_key: impl Into<String>) -> Self {
        self.remove_bg_api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoints(
        mut self,
        generation_url: impl Into<String>,
        recognition_url: impl Into<String>,
        remove_bg_url: impl Into<String>,
    ) -> Self {
        self.generation_url = generation_url.into();
        self.recognition_url = recognition_url.into();
        self.remove_bg_url = remove_bg_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub max_upload_bytes: usize,
    pub generation_model: String,
    pub recognition_model: String,
    pub transport: TransportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            recognition_model: DEFAULT_RECOGNITION_MODEL.to_string(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        let generation_model = env::var("GENERATION_MODEL")
            .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string());
        let recognition_model = env::var("RECOGNITION_MODEL")
            .unwrap_or_else(|_| DEFAULT_RECOGNITION_MODEL.to_string());

        Config {
            port,
            max_upload_bytes,
            generation_model,
            recognition_model,
            transport: TransportConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    pub fn with_models(
        mut self,
        generation_model: impl Into<String>,
        recognition_model: impl Into<String>,
    ) -> Self {
        self.generation_model = generation_model.into();
        self.recognition_model = recognition_model.into();
        self
    }

    pub fn with_transport(mut self, config: TransportConfig) -> Self {
        self.transport = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.port, None);
        assert_eq!(config.port.unwrap_or(DEFAULT_PORT), 8080);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.generation_model, DEFAULT_GENERATION_MODEL);
        assert_eq!(config.transport.remove_bg_url, DEFAULT_REMOVE_BG_URL);
        assert!(config.transport.ark_api_key.is_none());
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .with_port(9000)
            .with_max_upload_bytes(1024)
            .with_transport(TransportConfig::new().with_ark_key("secret").with_timeout(5));
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.transport.timeout_secs, Some(5));
    }

    #[test]
    fn test_debug_masks_keys() {
        let config = TransportConfig::new()
            .with_ark_key("ark-secret")
            .with_remove_bg_key("bg-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("ark-secret"));
        assert!(!printed.contains("bg-secret"));
        assert!(printed.contains("***"));
    }
}
