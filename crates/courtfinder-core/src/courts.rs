//! Court search data model shared by the clients, the orchestrator, and
//! every presentation surface.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::links::NavigationLinks;
use crate::CoreError;

/// Upper bound the search form accepts for the desired court count.
pub const MAX_DESIRED_COUNT: u32 = 20;

/// Map center shown before any search has settled (Dizengoff, Tel Aviv).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 32.079_249,
    longitude: 34.774_114,
};

/// A validated WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

/// Wire form of [`Coordinates`] before range checks.
#[derive(Deserialize)]
struct UncheckedCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<UncheckedCoordinates> for Coordinates {
    type Error = CoreError;

    fn try_from(raw: UncheckedCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Builds a point after checking both axes are finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinates`] when either value is NaN,
    /// infinite, or outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let invalid = |reason| CoreError::InvalidCoordinates {
            latitude,
            longitude,
            reason,
        };
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("not a finite number"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude out of range"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude out of range"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourtType {
    #[default]
    All,
    Football,
    Basketball,
    Volleyball,
    MultiPurpose,
}

impl CourtType {
    /// Wire value sent to the closest-courts backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CourtType::All => "all",
            CourtType::Football => "football",
            CourtType::Basketball => "basketball",
            CourtType::Volleyball => "volleyball",
            CourtType::MultiPurpose => "multi-purpose",
        }
    }
}

impl std::fmt::Display for CourtType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourtType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CourtType::All),
            "football" => Ok(CourtType::Football),
            "basketball" => Ok(CourtType::Basketball),
            "volleyball" => Ok(CourtType::Volleyball),
            "multi-purpose" | "multi_purpose" | "multipurpose" => Ok(CourtType::MultiPurpose),
            other => Err(CoreError::UnknownCourtType(other.to_owned())),
        }
    }
}

/// Filter criteria for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub court_type: CourtType,
    /// Free-text surface match; empty means unfiltered.
    pub surface_text: String,
    pub lighting_only: bool,
    pub exclude_mixed_locations: bool,
    /// Advisory to the backend; results are never truncated client-side.
    pub desired_count: u32,
}

impl SearchFilters {
    /// Returns a copy with `desired_count` clamped into `1..=MAX_DESIRED_COUNT`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.desired_count = clamp_desired_count(self.desired_count);
        self
    }
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            court_type: CourtType::All,
            surface_text: String::new(),
            lighting_only: false,
            exclude_mixed_locations: false,
            desired_count: 5,
        }
    }
}

/// Clamps a requested court count into the range the search form accepts.
#[must_use]
pub fn clamp_desired_count(count: u32) -> u32 {
    count.clamp(1, MAX_DESIRED_COUNT)
}

/// One physical court as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtRecord {
    pub court_type: String,
    pub surface_type: String,
    pub neighborhood: String,
    pub street: String,
    pub street_number: String,
    pub city: String,
    pub lighting: bool,
    pub availability: String,
    pub affiliation: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Distance from the query origin in kilometres.
    pub distance_km: f64,
}

impl CourtRecord {
    /// `"{street} {number}, {city}"`, skipping whichever parts are blank.
    #[must_use]
    pub fn street_address(&self) -> String {
        let line = format!("{} {}", self.street.trim(), self.street_number.trim());
        let line = line.trim();
        match (line.is_empty(), self.city.trim()) {
            (true, city) => city.to_owned(),
            (false, "") => line.to_owned(),
            (false, city) => format!("{line}, {city}"),
        }
    }
}

/// Courts sharing one geographic point, in backend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationGroup {
    pub coordinates: Coordinates,
    pub courts: Vec<CourtRecord>,
    /// Filled in by reverse geocoding after the primary search completes.
    pub resolved_address: Option<String>,
}

impl LocationGroup {
    #[must_use]
    pub fn new(coordinates: Coordinates, courts: Vec<CourtRecord>) -> Self {
        Self {
            coordinates,
            courts,
            resolved_address: None,
        }
    }

    #[must_use]
    pub fn court_count(&self) -> usize {
        self.courts.len()
    }

    #[must_use]
    pub fn navigation_links(&self) -> NavigationLinks {
        NavigationLinks::for_point(self.coordinates)
    }
}

/// Externally observable orchestrator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchViewState {
    pub is_loading: bool,
    pub has_searched: bool,
    pub warning_message: Option<String>,
    pub result_groups: Vec<LocationGroup>,
    pub map_center: Coordinates,
    /// Contents of the address input; populated by "locate me".
    pub address_text: String,
}

impl SearchViewState {
    /// Initial state centred on `map_center` with no results.
    #[must_use]
    pub fn initial(map_center: Coordinates) -> Self {
        Self {
            is_loading: false,
            has_searched: false,
            warning_message: None,
            result_groups: Vec::new(),
            map_center,
            address_text: String::new(),
        }
    }

    /// Number of courts across every group.
    #[must_use]
    pub fn court_count(&self) -> usize {
        self.result_groups.iter().map(LocationGroup::court_count).sum()
    }
}

impl Default for SearchViewState {
    fn default() -> Self {
        Self::initial(DEFAULT_CENTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn court(street: &str, number: &str, city: &str) -> CourtRecord {
        CourtRecord {
            court_type: "basketball court".to_owned(),
            surface_type: String::new(),
            neighborhood: String::new(),
            street: street.to_owned(),
            street_number: number.to_owned(),
            city: city.to_owned(),
            lighting: false,
            availability: String::new(),
            affiliation: String::new(),
            description: String::new(),
            image_url: None,
            distance_km: 0.4,
        }
    }

    #[test]
    fn coordinates_accept_boundaries() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn coordinates_reject_out_of_range_latitude() {
        let err = Coordinates::new(90.5, 0.0).unwrap_err();
        assert!(err.to_string().contains("latitude out of range"), "{err}");
    }

    #[test]
    fn coordinates_reject_out_of_range_longitude() {
        assert!(Coordinates::new(0.0, -180.01).is_err());
    }

    #[test]
    fn coordinates_reject_nan() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn coordinates_deserialize_checks_range() {
        let ok: Coordinates =
            serde_json::from_str(r#"{"latitude": 32.08, "longitude": 34.78}"#).unwrap();
        assert_eq!(ok, Coordinates::new(32.08, 34.78).unwrap());

        let err = serde_json::from_str::<Coordinates>(r#"{"latitude": 95.0, "longitude": 34.78}"#)
            .unwrap_err();
        assert!(err.to_string().contains("latitude out of range"), "{err}");
    }

    #[test]
    fn court_type_round_trips_wire_values() {
        for ty in [
            CourtType::All,
            CourtType::Football,
            CourtType::Basketball,
            CourtType::Volleyball,
            CourtType::MultiPurpose,
        ] {
            assert_eq!(ty.as_str().parse::<CourtType>().unwrap(), ty);
        }
    }

    #[test]
    fn court_type_parse_is_case_insensitive() {
        assert_eq!(
            " Basketball ".parse::<CourtType>().unwrap(),
            CourtType::Basketball
        );
    }

    #[test]
    fn court_type_rejects_unknown() {
        assert!(matches!(
            "tennis".parse::<CourtType>(),
            Err(CoreError::UnknownCourtType(ref s)) if s == "tennis"
        ));
    }

    #[test]
    fn court_type_serializes_kebab_case() {
        let json = serde_json::to_string(&CourtType::MultiPurpose).unwrap();
        assert_eq!(json, "\"multi-purpose\"");
    }

    #[test]
    fn filters_normalized_clamps_count() {
        let low = SearchFilters {
            desired_count: 0,
            ..SearchFilters::default()
        };
        assert_eq!(low.normalized().desired_count, 1);

        let high = SearchFilters {
            desired_count: 500,
            ..SearchFilters::default()
        };
        assert_eq!(high.normalized().desired_count, MAX_DESIRED_COUNT);
    }

    #[test]
    fn street_address_skips_blank_parts() {
        assert_eq!(
            court("Dizengoff", "100", "Tel Aviv").street_address(),
            "Dizengoff 100, Tel Aviv"
        );
        assert_eq!(court("Dizengoff", "", "").street_address(), "Dizengoff");
        assert_eq!(court("", "", "Tel Aviv").street_address(), "Tel Aviv");
    }

    #[test]
    fn view_state_counts_courts_across_groups() {
        let point = Coordinates::new(32.0, 34.0).unwrap();
        let mut state = SearchViewState::default();
        state.result_groups = vec![
            LocationGroup::new(point, vec![court("A", "1", ""), court("A", "1", "")]),
            LocationGroup::new(point, vec![court("B", "2", "")]),
        ];
        assert_eq!(state.court_count(), 3);
    }

    #[test]
    fn initial_view_state_is_empty() {
        let state = SearchViewState::default();
        assert!(!state.is_loading);
        assert!(!state.has_searched);
        assert!(state.warning_message.is_none());
        assert!(state.result_groups.is_empty());
        assert_eq!(state.map_center, DEFAULT_CENTER);
    }
}
