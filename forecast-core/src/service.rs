use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::{config::ServiceConfig, error::ForecastError, model::CivilLightResponse};

/// Remote source of civil-light forecasts.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// URL of the rendered forecast image for these coordinates.
    fn image_url(&self, lat: f64, lon: f64) -> String;

    async fn civil_light(&self, lat: f64, lon: f64) -> Result<CivilLightResponse, ForecastError>;
}

pub fn image_url(base: &str, lat: f64, lon: f64) -> String {
    format!(
        "{}/bin/civillight.php?%20lon={lon}&lat={lat}&ac=0&lang=en&unit=metric&output=internal&tzshift=0",
        base.trim_end_matches('/')
    )
}

pub fn data_url(base: &str, lat: f64, lon: f64) -> String {
    format!(
        "{}/bin/api.pl?lon={lon}&lat={lat}&product=civillight&output=json",
        base.trim_end_matches('/')
    )
}

/// HTTP client for 7Timer (https://www.7timer.info).
#[derive(Debug, Clone)]
pub struct SevenTimerClient {
    api_base: String,
    image_base: String,
    http: Client,
}

impl SevenTimerClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ForecastError> {
        let http = Client::builder().user_agent(config.user_agent.as_str()).build()?;

        Ok(Self {
            api_base: config.api_base.clone(),
            image_base: config.image_base.clone(),
            http,
        })
    }
}

#[async_trait]
impl ForecastSource for SevenTimerClient {
    fn image_url(&self, lat: f64, lon: f64) -> String {
        image_url(&self.image_base, lat, lon)
    }

    async fn civil_light(&self, lat: f64, lon: f64) -> Result<CivilLightResponse, ForecastError> {
        let url = data_url(&self.api_base, lat, lon);
        tracing::debug!(%url, "requesting civil-light forecast");

        let res = self.http.get(&url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ForecastError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = res.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            ForecastError::Malformed(format!("{e}; body: {}", truncate_body(&body)))
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_format() {
        assert_eq!(
            data_url("https://www.7timer.info", 32.08, 34.78),
            "https://www.7timer.info/bin/api.pl?lon=34.78&lat=32.08&product=civillight&output=json"
        );
    }

    #[test]
    fn image_url_format() {
        assert_eq!(
            image_url("https://www.7timer.info/", -33.5, 151.0),
            "https://www.7timer.info/bin/civillight.php?%20lon=151&lat=-33.5&ac=0&lang=en&unit=metric&output=internal&tzshift=0"
        );
    }

    #[test]
    fn client_uses_configured_image_host() {
        let cfg = ServiceConfig { image_base: "http://img.local".into(), ..ServiceConfig::default() };
        let client = SevenTimerClient::new(&cfg).expect("client");

        assert!(client.image_url(1.0, 2.0).starts_with("http://img.local/bin/civillight.php?"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
