//! Deep links into external navigation apps for a court location.

use serde::Serialize;

use crate::courts::Coordinates;

/// Waze turn-by-turn navigation link.
#[must_use]
pub fn waze_url(point: Coordinates) -> String {
    format!(
        "https://waze.com/ul?ll={},{}&navigate=yes",
        point.latitude(),
        point.longitude()
    )
}

/// Google Maps directions link with the point as destination.
#[must_use]
pub fn google_maps_url(point: Coordinates) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        point.latitude(),
        point.longitude()
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLinks {
    pub waze: String,
    pub google_maps: String,
}

impl NavigationLinks {
    #[must_use]
    pub fn for_point(point: Coordinates) -> Self {
        Self {
            waze: waze_url(point),
            google_maps: google_maps_url(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> Coordinates {
        Coordinates::new(32.08, 34.78).unwrap()
    }

    #[test]
    fn waze_url_embeds_lat_lon() {
        assert_eq!(
            waze_url(point()),
            "https://waze.com/ul?ll=32.08,34.78&navigate=yes"
        );
    }

    #[test]
    fn google_maps_url_sets_destination() {
        assert_eq!(
            google_maps_url(point()),
            "https://www.google.com/maps/dir/?api=1&destination=32.08,34.78"
        );
    }

    #[test]
    fn navigation_links_cover_both_apps() {
        let links = NavigationLinks::for_point(point());
        assert!(links.waze.starts_with("https://waze.com/"));
        assert!(links.google_maps.starts_with("https://www.google.com/maps/"));
    }
}
