//! Gateway settings that can be changed while the service is running.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use crate::error::DialogError;

pub const DEFAULT_TIME_ZONE: &str = "Africa/Lagos";
pub const DEFAULT_RAPID_PRO_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(rename = "timeZone")]
    pub time_zone: String,
    #[serde(rename = "rapidProUrl")]
    pub rapid_pro_url: String,
    #[serde(rename = "rapidProAPIToken")]
    pub rapid_pro_api_token: String,
    #[serde(rename = "rapidProChannelUUID")]
    pub rapid_pro_channel_uuid: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            rapid_pro_url: DEFAULT_RAPID_PRO_URL.to_string(),
            rapid_pro_api_token: String::new(),
            rapid_pro_channel_uuid: String::new(),
        }
    }
}

impl GatewaySettings {
    /// External-channel endpoint that accepts inbound participant messages.
    pub fn receive_url(&self) -> String {
        format!(
            "{}/c/ex/{}/receive",
            self.rapid_pro_url.trim_end_matches('/'),
            self.rapid_pro_channel_uuid
        )
    }

    /// The configured zone, or UTC if the name is not a known zone.
    pub fn zone(&self) -> TimeZone {
        TimeZone::get(&self.time_zone).unwrap_or_else(|e| {
            tracing::warn!(time_zone = %self.time_zone, error = %e, "unknown time zone, using UTC");
            TimeZone::UTC
        })
    }

    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::TimeZone => &self.time_zone,
            SettingKey::RapidProUrl => &self.rapid_pro_url,
            SettingKey::RapidProApiToken => &self.rapid_pro_api_token,
            SettingKey::RapidProChannelUuid => &self.rapid_pro_channel_uuid,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), DialogError> {
        let slot = match key {
            SettingKey::TimeZone => return Err(DialogError::ReadOnlySetting(key.to_string())),
            SettingKey::RapidProUrl => &mut self.rapid_pro_url,
            SettingKey::RapidProApiToken => &mut self.rapid_pro_api_token,
            SettingKey::RapidProChannelUuid => &mut self.rapid_pro_channel_uuid,
        };
        *slot = value.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    TimeZone,
    RapidProUrl,
    RapidProApiToken,
    RapidProChannelUuid,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimeZone => "timeZone",
            Self::RapidProUrl => "rapidProUrl",
            Self::RapidProApiToken => "rapidProAPIToken",
            Self::RapidProChannelUuid => "rapidProChannelUUID",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timeZone" => Ok(Self::TimeZone),
            "rapidProUrl" => Ok(Self::RapidProUrl),
            "rapidProAPIToken" => Ok(Self::RapidProApiToken),
            "rapidProChannelUUID" => Ok(Self::RapidProChannelUuid),
            other => Err(DialogError::UnknownSetting(other.to_string())),
        }
    }
}

/// Settings shared between the gateway client, the controller and the
/// configuration endpoints.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings(Arc<RwLock<GatewaySettings>>);

impl SharedSettings {
    pub fn new(settings: GatewaySettings) -> Self {
        Self(Arc::new(RwLock::new(settings)))
    }

    pub fn snapshot(&self) -> GatewaySettings {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn update(&self, key: SettingKey, value: &str) -> Result<GatewaySettings, DialogError> {
        let mut settings = self.0.write().unwrap_or_else(PoisonError::into_inner);
        settings.set(key, value)?;
        tracing::info!(setting = %key, "gateway setting updated");
        Ok(settings.clone())
    }
}
