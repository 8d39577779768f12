//! The live-weather collaborator.
//!
//! The controller asks a [`WeatherSource`] for the conditions at a
//! coordinate and maps the answer through [`gp_env::classify`].  Failures
//! are never fatal: after the configured number of attempts the controller
//! falls back to a simulated environment update.

use gp_env::WeatherReading;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WeatherError {
    #[error("weather service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed weather response: {0}")]
    Malformed(String),
}

/// Anything that can report current weather at a coordinate.
pub trait WeatherSource {
    fn current(&mut self, latitude: f64, longitude: f64) -> Result<WeatherReading, WeatherError>;
}

/// No provider configured; every request fails.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoWeatherSource;

impl WeatherSource for NoWeatherSource {
    fn current(&mut self, _latitude: f64, _longitude: f64) -> Result<WeatherReading, WeatherError> {
        Err(WeatherError::Unavailable("no weather source configured".into()))
    }
}

/// Returns the same reading for every coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StaticWeather(pub WeatherReading);

impl WeatherSource for StaticWeather {
    fn current(&mut self, _latitude: f64, _longitude: f64) -> Result<WeatherReading, WeatherError> {
        Ok(self.0)
    }
}

impl<W: WeatherSource + ?Sized> WeatherSource for Box<W> {
    fn current(&mut self, latitude: f64, longitude: f64) -> Result<WeatherReading, WeatherError> {
        (**self).current(latitude, longitude)
    }
}
