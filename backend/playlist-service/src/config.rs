/// Configuration management for playlist-service
///
/// Loads configuration from environment variables with sensible defaults.
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub vod: VodConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
}

/// Upstream VOD API settings
#[derive(Clone, Debug, Deserialize)]
pub struct VodConfig {
    /// RPC endpoint, e.g. https://vod.cn-shanghai.aliyuncs.com
    pub endpoint: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    /// Region embedded in playback credentials; empty falls back to the
    /// signer default
    pub region: String,
    /// VOD application whose play key signs playback credentials
    pub app_id: String,
    pub api_version: String,
    /// Per-request timeout so a stuck upstream call cannot block aggregation
    pub request_timeout_secs: u64,
    /// Play key cache TTL
    pub play_key_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                host: std::env::var("PLAYLIST_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PLAYLIST_SERVICE_PORT")
                    .unwrap_or_else(|_| "8086".to_string())
                    .parse()
                    .unwrap_or(8086),
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            },
            vod: VodConfig {
                endpoint: std::env::var("VOD_ENDPOINT")
                    .unwrap_or_else(|_| "https://vod.cn-shanghai.aliyuncs.com".to_string()),
                access_key_id: std::env::var("VOD_ACCESS_KEY_ID").unwrap_or_default(),
                access_key_secret: std::env::var("VOD_ACCESS_KEY_SECRET").unwrap_or_default(),
                region: std::env::var("VOD_REGION")
                    .unwrap_or_else(|_| playback_token::DEFAULT_REGION_ID.to_string()),
                app_id: std::env::var("VOD_APP_ID")
                    .unwrap_or_else(|_| playback_token::DEFAULT_APP_ID.to_string()),
                api_version: std::env::var("VOD_API_VERSION")
                    .unwrap_or_else(|_| "2017-03-21".to_string()),
                request_timeout_secs: std::env::var("VOD_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
                play_key_ttl_secs: std::env::var("PLAY_KEY_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(600),
            },
        })
    }
}
