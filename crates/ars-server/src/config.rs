use std::env;
use std::time::Duration;

use ars_dialog::settings::{GatewaySettings, DEFAULT_RAPID_PRO_URL, DEFAULT_TIME_ZONE};

pub const DEFAULT_BIND: &str = "0.0.0.0:30001";
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 30;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub gateway: GatewaySettings,
    pub delivery_timeout: Duration,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        let delivery_timeout = match var("ARS_DELIVERY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid ARS_DELIVERY_TIMEOUT_SECS, using default");
                DEFAULT_DELIVERY_TIMEOUT_SECS
            }),
            None => DEFAULT_DELIVERY_TIMEOUT_SECS,
        };

        let allowed_origins = match var("ALLOWED_ORIGINS") {
            Some(raw) if raw.trim() != "*" => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        Self {
            bind: or("ARS_BIND", DEFAULT_BIND),
            gateway: GatewaySettings {
                time_zone: or("TIMEZONE", DEFAULT_TIME_ZONE),
                rapid_pro_url: or("RAPID_PRO_URL", DEFAULT_RAPID_PRO_URL),
                rapid_pro_api_token: or("RAPID_PRO_API_TOKEN", ""),
                rapid_pro_channel_uuid: or("RAPID_PRO_CHANNEL_UUID", ""),
            },
            delivery_timeout: Duration::from_secs(delivery_timeout),
            allowed_origins,
        }
    }
}
