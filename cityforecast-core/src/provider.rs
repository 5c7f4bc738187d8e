use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Error;
use crate::model::{CityCandidate, DailyForecast};

pub mod openweather;

/// A weather backend: turns a free-text city name into candidates and a
/// coordinate pair into daily summaries.
///
/// The interactive loop only talks to this trait, so tests can swap in a
/// scripted implementation.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Look up candidates for a city name, at most five, in the order the
    /// upstream ranks them. An empty list means "no match" and is not an
    /// error; a blank query fails with [`Error::EmptyQuery`].
    async fn resolve(&self, query: &str) -> Result<Vec<CityCandidate>, Error>;

    /// Fetch up to five daily summaries for a coordinate pair, ordered by
    /// date ascending. An empty list means the upstream had no data.
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>, Error>;
}
