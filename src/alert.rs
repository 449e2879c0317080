//! Discord Alert Module
//!
//! Sends a webhook notification when the detector flags a drain. This
//! is a sample downstream responder - the decision core never depends
//! on it, and alerts are disabled when DISCORD_WEBHOOK is unset.
//!
//! Author: AI-Generated
//! Created: 2026-02-11

use crate::detector::PPM;
use crate::types::DrainReport;
use serde::Serialize;
use tracing::{error, info, warn};

/// Discord webhook message structure
#[derive(Serialize)]
struct DiscordMessage {
    content: Option<String>,
    embeds: Vec<DiscordEmbed>,
}

/// Discord embed structure for rich formatting
#[derive(Serialize)]
struct DiscordEmbed {
    title: String,
    description: String,
    color: u32,
    fields: Vec<DiscordField>,
    timestamp: Option<String>,
}

#[derive(Serialize)]
struct DiscordField {
    name: String,
    value: String,
    inline: bool,
}

/// Red - a drain alert is always an incident
const ALERT_COLOR: u32 = 0xcc_00_00;

/// Webhook alerter for drain events
pub struct DrainAlerter {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl DrainAlerter {
    pub fn new(webhook_url: Option<String>) -> Self {
        if webhook_url.is_some() {
            info!("Discord drain alerts enabled");
        } else {
            warn!("DISCORD_WEBHOOK not set - drain alerts disabled");
        }

        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Send one alert for a triggered drain report. Delivery failures
    /// are logged, never propagated - alerting must not take down the
    /// monitor loop.
    pub async fn send_drain_alert(&self, report: &DrainReport) {
        let webhook_url = match &self.webhook_url {
            Some(url) => url,
            None => return,
        };

        let fields = report
            .drains
            .iter()
            .map(|drain| DiscordField {
                name: format!("Pool {}", drain.slot),
                value: format!(
                    "token0 `{:?}` -{:.1}%\ntoken1 `{:?}` -{:.1}%\nwindow {} → {}",
                    drain.token0,
                    drain.drop_ratio0_ppm as f64 * 100.0 / PPM as f64,
                    drain.token1,
                    drain.drop_ratio1_ppm as f64 * 100.0 / PPM as f64,
                    drain.from_observed_at,
                    drain.to_observed_at,
                ),
                inline: false,
            })
            .collect();

        let message = DiscordMessage {
            content: Some("🚨 Liquidity drain detected".to_string()),
            embeds: vec![DiscordEmbed {
                title: "Cross-DEX Liquidity Trap".to_string(),
                description: format!("{} pool(s) flagged as draining", report.drains.len()),
                color: ALERT_COLOR,
                fields,
                timestamp: Some(chrono::Utc::now().to_rfc3339()),
            }],
        };

        match self.client.post(webhook_url).json(&message).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Drain alert delivered");
            }
            Ok(response) => {
                error!("Drain alert rejected: HTTP {}", response.status());
            }
            Err(e) => {
                error!("Failed to deliver drain alert: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerter_disabled_without_webhook() {
        let alerter = DrainAlerter::new(None);
        assert!(!alerter.is_enabled());
    }

    #[test]
    fn test_alerter_enabled_with_webhook() {
        let alerter = DrainAlerter::new(Some("https://example.invalid/hook".to_string()));
        assert!(alerter.is_enabled());
    }

    #[tokio::test]
    async fn test_send_without_webhook_is_a_noop() {
        let alerter = DrainAlerter::new(None);
        alerter
            .send_drain_alert(&DrainReport { drains: vec![] })
            .await;
    }
}
