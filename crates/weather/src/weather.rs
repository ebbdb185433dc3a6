//! Forecast client for the third-party weather API.
//!
//! One GET per call against the provider's `forecast.json` endpoint. The
//! rows come back exactly as the provider reports them; nothing is
//! recomputed client-side.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// One row of the forecast table: date, average temperature in both units,
/// condition text, and the provider's icon URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub avg_c: f64,
    pub avg_f: f64,
    pub condition: String,
    pub icon: String,
}

// Provider wire shapes. Only the fields the table renders are decoded.

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecast: ForecastBlock,
}

#[derive(Debug, Deserialize)]
struct ForecastBlock {
    forecastday: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    date: String,
    day: RawDayDetail,
}

#[derive(Debug, Deserialize)]
struct RawDayDetail {
    avgtemp_c: f64,
    avgtemp_f: f64,
    condition: RawCondition,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base: String,
    key: String,
}

impl WeatherClient {
    pub fn new(base: impl Into<String>, key: impl Into<String>) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(WeatherError::Transport)?;
        Ok(Self {
            http,
            base: base.into(),
            key: key.into(),
        })
    }

    /// Fetch the multi-day forecast for a location.
    pub async fn forecast(
        &self,
        location: &str,
        days: u8,
    ) -> Result<Vec<ForecastDay>, WeatherError> {
        let url = format!("{}/forecast.json", self.base.trim_end_matches('/'));
        let days = days.to_string();
        let response = self
            .http
            .get(url)
            .query(&[
                ("key", self.key.as_str()),
                ("q", location),
                ("days", days.as_str()),
            ])
            .send()
            .await
            .map_err(WeatherError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let body = response.text().await.map_err(WeatherError::Transport)?;
        decode_forecast(&body)
    }
}

/// Decode the provider body into table rows.
pub fn decode_forecast(body: &str) -> Result<Vec<ForecastDay>, WeatherError> {
    let response: ForecastResponse = serde_json::from_str(body).map_err(WeatherError::Decode)?;
    Ok(response
        .forecast
        .forecastday
        .into_iter()
        .map(|raw| ForecastDay {
            date: raw.date,
            avg_c: raw.day.avgtemp_c,
            avg_f: raw.day.avgtemp_f,
            condition: raw.day.condition.text,
            icon: raw.day.condition.icon,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "location": { "name": "Vandenberg" },
        "forecast": {
            "forecastday": [
                {
                    "date": "2025-06-01",
                    "day": {
                        "avgtemp_c": 17.4,
                        "avgtemp_f": 63.3,
                        "maxwind_kph": 22.0,
                        "condition": {
                            "text": "Partly cloudy",
                            "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png",
                            "code": 1003
                        }
                    }
                },
                {
                    "date": "2025-06-02",
                    "day": {
                        "avgtemp_c": 19.0,
                        "avgtemp_f": 66.2,
                        "condition": { "text": "Sunny", "icon": "//cdn/113.png" }
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn decode_forecast_keeps_provider_order_and_values() {
        let days = decode_forecast(SAMPLE).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2025-06-01");
        assert_eq!(days[0].avg_c, 17.4);
        assert_eq!(days[0].avg_f, 63.3);
        assert_eq!(days[0].condition, "Partly cloudy");
        assert_eq!(days[0].icon, "//cdn.weatherapi.com/weather/64x64/day/116.png");
        assert_eq!(days[1].condition, "Sunny");
    }

    #[test]
    fn decode_forecast_rejects_malformed_bodies() {
        let err = decode_forecast("{\"forecast\": 1}").unwrap_err();
        assert!(matches!(err, WeatherError::Decode(_)));
    }

    #[test]
    fn decode_forecast_handles_an_empty_window() {
        let days = decode_forecast(r#"{ "forecast": { "forecastday": [] } }"#).unwrap();
        assert!(days.is_empty());
    }
}
