//! Core library for the `cityforecast` CLI.
//!
//! This crate defines:
//! - Shared domain models (city candidates, daily summaries)
//! - A typed error taxonomy for upstream and terminal faults
//! - Abstraction over weather backends, plus the OpenWeather proxy client
//!
//! It is used by `cityforecast-cli`, but can also be reused by other binaries or services.

pub mod error;
pub mod model;
pub mod provider;

pub use error::Error;
pub use model::{CityCandidate, DailyForecast};
pub use provider::{WeatherProvider, openweather::OpenWeatherClient};
