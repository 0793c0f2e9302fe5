//! Wire types for the Nominatim `search` and `reverse` endpoints.

use serde::Deserialize;

/// One forward-geocoding candidate. Nominatim sends coordinates as numeric
/// strings, but some compatible providers send plain numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCandidate {
    pub lat: serde_json::Value,
    pub lon: serde_json::Value,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SearchCandidate {
    /// Parses `(lat, lon)`; `None` when either is missing or not numeric.
    #[must_use]
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        Some((parse_number(&self.lat)?, parse_number(&self.lon)?))
    }
}

/// Reverse-geocoding answer. A point with no address comes back as
/// `{"error": "Unable to geocode"}`, which leaves `display_name` empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseResult {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

fn parse_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
