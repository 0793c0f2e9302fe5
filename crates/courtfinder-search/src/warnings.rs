//! User-facing warning strings. Display text is fixed English.

use crate::error::SearchError;

pub const EMPTY_ADDRESS: &str = "Enter an address or use your current location.";
pub const NO_RESULTS: &str = "No courts found for this address and filters.";
pub const SERVICE_UNAVAILABLE: &str =
    "The court search service is unavailable right now. Please try again.";
pub const GEOLOCATION_UNSUPPORTED: &str = "Location is not supported on this device.";
pub const PERMISSION_DENIED: &str =
    "Location permission was denied. Allow access or enter an address.";
pub const POSITION_UNAVAILABLE: &str = "Your current location could not be determined.";
pub const LOCATED_WITHOUT_ADDRESS: &str =
    "Found your location, but could not look up its street address.";

/// Informational notice when fewer courts came back than were asked for.
#[must_use]
pub fn fewer_than_requested(found: usize) -> String {
    format!("found only {found} matching courts")
}

/// Maps a command failure to the warning shown to the user.
#[must_use]
pub fn warning_for(err: &SearchError) -> String {
    match err {
        SearchError::NotFound { query } if query.trim().is_empty() => EMPTY_ADDRESS.to_owned(),
        SearchError::NotFound { query } => {
            format!("Address \"{}\" was not found. Try a more specific address.", query.trim())
        }
        SearchError::PermissionDenied => PERMISSION_DENIED.to_owned(),
        SearchError::PositionUnavailable => POSITION_UNAVAILABLE.to_owned(),
        SearchError::Unsupported => GEOLOCATION_UNSUPPORTED.to_owned(),
        SearchError::ServiceUnavailable(_) => SERVICE_UNAVAILABLE.to_owned(),
        SearchError::InvalidResponse { message } => format!(
            "Server error: {}",
            message.as_deref().unwrap_or("unknown issue")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_requested_wording() {
        assert_eq!(fewer_than_requested(3), "found only 3 matching courts");
    }

    #[test]
    fn blank_query_asks_for_an_address() {
        let err = SearchError::NotFound {
            query: "  ".to_owned(),
        };
        assert_eq!(warning_for(&err), EMPTY_ADDRESS);
    }

    #[test]
    fn not_found_names_the_address() {
        let err = SearchError::NotFound {
            query: "Atlantis".to_owned(),
        };
        assert!(warning_for(&err).contains("\"Atlantis\""));
    }

    #[test]
    fn invalid_response_references_payload() {
        let err = SearchError::InvalidResponse {
            message: Some("Missing coordinates".to_owned()),
        };
        assert_eq!(warning_for(&err), "Server error: Missing coordinates");
        let err = SearchError::InvalidResponse { message: None };
        assert_eq!(warning_for(&err), "Server error: unknown issue");
    }

    #[test]
    fn geolocation_failures_have_distinct_messages() {
        let messages = [
            warning_for(&SearchError::Unsupported),
            warning_for(&SearchError::PermissionDenied),
            warning_for(&SearchError::PositionUnavailable),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}
