//! Named city presets.

use crate::{EnvError, EnvResult};

/// Static description of a city's character.
///
/// `traffic_volatility` scales the per-tick traffic noise and
/// `weather_risk` scales rain noise and the odds of weather changes and
/// flooding.  Both are in `[0, 1]`; `0.5` reproduces the base rates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CityProfile {
    pub name: &'static str,
    pub traffic_volatility: f64,
    pub weather_risk: f64,
    /// Base speed in km/h.
    pub average_speed: f64,
    pub description: &'static str,
}

pub static CITY_PROFILES: [CityProfile; 4] = [
    CityProfile {
        name: "Generic",
        traffic_volatility: 0.5,
        weather_risk: 0.5,
        average_speed: 30.0,
        description: "Balanced synthetic city",
    },
    CityProfile {
        name: "Mumbai",
        traffic_volatility: 0.9,
        weather_risk: 0.8,
        average_speed: 18.0,
        description: "High traffic, monsoon",
    },
    CityProfile {
        name: "Delhi",
        traffic_volatility: 0.7,
        weather_risk: 0.4,
        average_speed: 22.0,
        description: "Pollution aware",
    },
    CityProfile {
        name: "Bangalore",
        traffic_volatility: 0.8,
        weather_risk: 0.3,
        average_speed: 20.0,
        description: "Tech hub, signals",
    },
];

impl CityProfile {
    /// The balanced base profile.
    pub fn generic() -> &'static CityProfile {
        &CITY_PROFILES[0]
    }

    /// Case-insensitive lookup by name.
    pub fn lookup(name: &str) -> EnvResult<&'static CityProfile> {
        let name = name.trim();
        CITY_PROFILES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| EnvError::UnknownCity(name.to_string()))
    }

    /// Multiplier applied to base traffic noise and rates.
    #[inline]
    pub fn traffic_scale(&self) -> f64 {
        0.5 + self.traffic_volatility
    }

    /// Multiplier applied to base weather noise and rates.
    #[inline]
    pub fn weather_scale(&self) -> f64 {
        0.5 + self.weather_risk
    }
}
