//! Wire types for `POST /api/closest`.
//!
//! The backend serializes a spreadsheet-backed dataframe, so text columns may
//! arrive as `null` or as numbers (house numbers in particular). The
//! deserializers here accept all of those and hand clean values to
//! [`crate::normalize`].

use courtfinder_core::{Coordinates, SearchFilters};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for the closest-courts endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosestRequest {
    pub lat: f64,
    pub lon: f64,
    pub count: u32,
    #[serde(rename = "type")]
    pub court_type: String,
    pub surface: String,
    pub lighting: bool,
    pub exclude_mixed_locations: bool,
}

impl ClosestRequest {
    #[must_use]
    pub fn new(origin: Coordinates, filters: &SearchFilters) -> Self {
        Self {
            lat: origin.latitude(),
            lon: origin.longitude(),
            count: filters.desired_count,
            court_type: filters.court_type.as_str().to_owned(),
            surface: filters.surface_text.trim().to_owned(),
            lighting: filters.lighting_only,
            exclude_mixed_locations: filters.exclude_mixed_locations,
        }
    }
}

/// One court as sent by the backend. In the grouped shape the coordinates
/// live on the enclosing [`RawGroup`]; in the legacy flat shape each court
/// carries its own.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawCourt {
    #[serde(default, deserialize_with = "lenient_string")]
    pub court_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub surface_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub street: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub street_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub neighborhood: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub lighting: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub availability: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub affiliation: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

/// Courts colocated at one point, the backend's grouped shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawGroup {
    #[serde(deserialize_with = "required_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "required_f64")]
    pub longitude: f64,
    pub courts: Vec<RawCourt>,
}

/// One element of the response array, in either shape.
///
/// `Group` is tried first; it is the only variant with a required `Courts` key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Group(RawGroup),
    Flat(RawCourt),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_owned(),
        // Integral floats ("12.0") come from pandas widening int columns with NaN.
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite()))
}

fn required_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_f64(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a numeric coordinate"))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "כן"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    })
}
