use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One geocoding match for a user query.
///
/// Candidates are handed out in the order the upstream ranks them and are
/// discarded once a forecast request has been issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCandidate {
    pub name: String,
    pub country: String,
    /// Administrative area, when the upstream reports one.
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityCandidate {
    /// Render as `"name, state, country"`, eliding the state when it is
    /// missing, empty, or just repeats the city name.
    pub fn label(&self) -> String {
        match self.state.as_deref() {
            Some(state) if !state.is_empty() && state != self.name => {
                format!("{}, {}, {}", self.name, state, self.country)
            }
            _ => format!("{}, {}", self.name, self.country),
        }
    }
}

/// One day of the reduced forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Human-readable condition, title-cased ("Scattered Clouds").
    pub description: String,
    pub max_temperature_c: f64,
}

impl std::fmt::Display for DailyForecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {:.1}°C", self.date, self.description, self.max_temperature_c)
    }
}
