//! Weather state and the mapping from external weather readings.

use std::collections::BTreeSet;
use std::fmt;

use gp_core::{NodeId, SimRng};

/// Weather impact reported for a flooded node, regardless of weather type.
pub const FLOOD_IMPACT: f64 = 5.0;

// ── WeatherType ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WeatherType {
    #[default]
    Clear,
    Rainy,
    Stormy,
    Snowy,
    Foggy,
}

impl WeatherType {
    /// Travel-cost multiplier for a non-flooded node.
    pub fn impact(self) -> f64 {
        match self {
            WeatherType::Clear  => 1.0,
            WeatherType::Rainy  => 1.5,
            WeatherType::Stormy => 2.5,
            WeatherType::Foggy  => 1.8,
            WeatherType::Snowy  => 3.0,
        }
    }

    /// Deterministic type for a rain level, used by explicit overrides.
    pub fn for_rain(rain: f64) -> Self {
        if rain > 0.8 {
            WeatherType::Stormy
        } else if rain > 0.3 {
            WeatherType::Rainy
        } else {
            WeatherType::Clear
        }
    }

    /// Type for a rain level with a small chance of fog in light rain.
    pub fn sample(rain: f64, rng: &mut SimRng) -> Self {
        if rain > 0.3 {
            return Self::for_rain(rain);
        }
        if rng.gen_bool(0.1) || (rain < 0.1 && rng.gen_bool(0.2)) {
            return WeatherType::Foggy;
        }
        WeatherType::Clear
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeatherType::Clear  => "clear",
            WeatherType::Rainy  => "rainy",
            WeatherType::Stormy => "stormy",
            WeatherType::Snowy  => "snowy",
            WeatherType::Foggy  => "foggy",
        }
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── WeatherState ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherState {
    /// Rain level in `[0, 1]`.
    pub rain: f64,
    pub kind: WeatherType,
    pub flood_zones: BTreeSet<NodeId>,
    /// `1.0` is unobstructed.
    pub visibility: f64,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            rain: 0.0,
            kind: WeatherType::Clear,
            flood_zones: BTreeSet::new(),
            visibility: 1.0,
        }
    }
}

impl WeatherState {
    pub fn is_flooded(&self, node: NodeId) -> bool {
        self.flood_zones.contains(&node)
    }

    pub fn impact(&self, node: NodeId) -> f64 {
        if self.is_flooded(node) { FLOOD_IMPACT } else { self.kind.impact() }
    }

    /// Re-roll visibility for the current weather type.
    pub fn refresh_visibility(&mut self, rng: &mut SimRng) {
        self.visibility = match self.kind {
            WeatherType::Foggy => 0.3 + rng.unit() * 0.3,
            WeatherType::Stormy => 0.5,
            _ => 1.0,
        };
    }

    /// Replace the flood zones with 0–2 random nodes out of `node_count`.
    pub fn regenerate_floods(&mut self, node_count: usize, rng: &mut SimRng) {
        self.flood_zones.clear();
        if node_count == 0 {
            return;
        }
        let zones: usize = rng.gen_range(0..3);
        for _ in 0..zones {
            self.flood_zones.insert(NodeId(rng.gen_range(0..node_count as u32)));
        }
    }
}

// ── External readings ─────────────────────────────────────────────────────────

/// Raw snapshot returned by a weather provider.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherReading {
    /// Precipitation in millimetres.
    pub rain_mm: f64,
    /// WMO-style weather interpretation code.
    pub weather_code: u16,
    pub wind_speed: f64,
}

/// Internal weather derived from a [`WeatherReading`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClassifiedWeather {
    pub kind: WeatherType,
    pub rain: f64,
    pub visibility: f64,
}

/// Map an external reading onto the internal weather model.
///
/// Code thresholds: `>= 95` stormy, `>= 70` snowy, rain above 0.5 mm rainy,
/// `>= 45` foggy, otherwise clear.  Rain level is `rain_mm / 10` clamped to
/// `[0, 1]`.  Pure: the same reading always yields the same result.
pub fn classify(reading: &WeatherReading) -> ClassifiedWeather {
    let code = reading.weather_code;
    let kind = if code >= 95 {
        WeatherType::Stormy
    } else if code >= 70 {
        WeatherType::Snowy
    } else if reading.rain_mm > 0.5 {
        WeatherType::Rainy
    } else if code >= 45 {
        WeatherType::Foggy
    } else {
        WeatherType::Clear
    };

    let visibility = match kind {
        WeatherType::Foggy => 0.4,
        WeatherType::Stormy => 0.5,
        WeatherType::Snowy => 0.6,
        _ => 1.0,
    };

    ClassifiedWeather {
        kind,
        rain: (reading.rain_mm / 10.0).clamp(0.0, 1.0),
        visibility,
    }
}
