use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;
use crate::model::{CityCandidate, DailyForecast};

use super::WeatherProvider;

/// Public OpenWeather-compatible proxy that requires no API key.
pub const DEFAULT_BASE_URL: &str = "https://weather.lewagon.com";

/// Most geocoding matches requested for one query.
const MATCH_LIMIT: usize = 5;

/// The forecast arrives as 3-hour readings, 8 per day.
const READINGS_PER_DAY: usize = 8;

/// The proxy serves at most 5 days of readings.
const MAX_READINGS: usize = 40;

/// Client for the keyless OpenWeather proxy.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different host, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| Error::Network { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| Error::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(Error::Status { endpoint, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| Error::Format { endpoint, source })
    }
}

impl Default for OpenWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn resolve(&self, query: &str) -> Result<Vec<CityCandidate>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        debug!(query, "looking up city candidates");

        // A JSON `null` body counts the same as an empty array.
        let entries: Option<Vec<GeoEntry>> = self
            .get_json(
                "geocoding",
                "/geo/1.0/direct",
                &[("q", query.to_string()), ("limit", MATCH_LIMIT.to_string())],
            )
            .await?;

        Ok(entries.unwrap_or_default().into_iter().filter_map(GeoEntry::into_candidate).collect())
    }

    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>, Error> {
        debug!(latitude, longitude, "fetching 5-day forecast");

        let parsed: ForecastResponse = self
            .get_json(
                "forecast",
                "/data/2.5/forecast",
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;

        Ok(daily_summaries(&parsed.list.unwrap_or_default()))
    }
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
    state: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl GeoEntry {
    /// An entry without coordinates cannot feed a forecast request; drop it.
    fn into_candidate(self) -> Option<CityCandidate> {
        let (latitude, longitude) = (self.lat?, self.lon?);
        Some(CityCandidate {
            name: self.name,
            country: self.country,
            state: self.state,
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    /// One reading per 3-hour slot; absent and `null` both mean no data.
    list: Option<Vec<ForecastReading>>,
}

#[derive(Debug, Deserialize)]
struct ForecastReading {
    #[serde(default)]
    dt_txt: String,
    #[serde(default)]
    weather: Vec<ConditionLabel>,
    main: Option<MainReadings>,
}

#[derive(Debug, Deserialize)]
struct ConditionLabel {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp_max: f64,
}

/// Collapse 3-hour readings into one summary per day by sampling every
/// eighth entry, starting at the current slot.
fn daily_summaries(readings: &[ForecastReading]) -> Vec<DailyForecast> {
    let limit = readings.len().min(MAX_READINGS);
    (0..limit).step_by(READINGS_PER_DAY).filter_map(|i| summarize(&readings[i])).collect()
}

/// A reading missing its timestamp, condition label, or temperature block
/// is skipped rather than poisoning the whole forecast.
fn summarize(reading: &ForecastReading) -> Option<DailyForecast> {
    let date = reading
        .dt_txt
        .get(..10)
        .and_then(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())?;
    let description = title_case(&reading.weather.first()?.description);
    let max_temperature_c = reading.main.as_ref()?.temp_max;

    Some(DailyForecast { date, description, max_temperature_c })
}

/// Uppercase the first letter of every word: "scattered clouds" becomes
/// "Scattered Clouds".
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
