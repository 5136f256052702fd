//! Outbound leg to the RapidPro external channel.

use std::time::Duration;

use jiff::Timestamp;
use serde::Serialize;

use ars_storage::BoxFuture;

use crate::error::DialogError;
use crate::settings::SharedSettings;

/// One participant message forwarded to the flow engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub text: String,
    pub date: Timestamp,
}

pub trait Gateway: Send + Sync {
    /// Deliver `message`. The flow's reply arrives later on the delivery
    /// callback, not in the response to this call.
    fn send(&self, message: OutboundMessage) -> BoxFuture<'_, Result<(), DialogError>>;
}

/// Posts form-encoded messages to `{url}/c/ex/{channel}/receive`.
pub struct RapidProGateway {
    agent: ureq::Agent,
    settings: SharedSettings,
}

impl RapidProGateway {
    pub fn new(settings: SharedSettings, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            settings,
        }
    }
}

impl Gateway for RapidProGateway {
    fn send(&self, message: OutboundMessage) -> BoxFuture<'_, Result<(), DialogError>> {
        Box::pin(async move {
            let settings = self.settings.snapshot();
            let url = settings.receive_url();
            let token = settings.rapid_pro_api_token;
            let agent = self.agent.clone();

            tracing::debug!(url = %url, from = %message.from, "forwarding message to flow");

            let result = tokio::task::spawn_blocking(move || {
                let date = message.date.to_string();
                let form = [
                    ("from", message.from.as_str()),
                    ("to", message.to.as_str()),
                    ("text", message.text.as_str()),
                    ("date", date.as_str()),
                ];
                let mut request = agent.post(&url);
                if !token.is_empty() {
                    request = request.header("Authorization", format!("Token {token}"));
                }
                request.send_form(form).map(|_| ())
            })
            .await
            .map_err(|e| DialogError::UpstreamGateway(format!("gateway task failed: {e}")))?;

            result.map_err(|e| {
                tracing::error!(error = %e, "flow gateway rejected the message");
                DialogError::UpstreamGateway(e.to_string())
            })
        })
    }
}
