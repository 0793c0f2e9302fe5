//! Converts raw backend entries into [`LocationGroup`]s.

use courtfinder_core::{Coordinates, CourtRecord, LocationGroup};

use crate::types::{RawCourt, RawEntry};

/// Builds location groups in the order the backend sent them.
///
/// Grouped entries map one-to-one. Flat entries are merged into a group per
/// distinct coordinate pair, placed where that pair first appeared. Entries
/// whose coordinates are missing or out of range, and groups with no courts,
/// are skipped with a warning.
#[must_use]
pub fn into_location_groups(entries: Vec<RawEntry>) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::with_capacity(entries.len());
    // (latitude bits, longitude bits) -> index into `groups`, flat entries only.
    let mut flat_index: Vec<((u64, u64), usize)> = Vec::new();

    for (position, entry) in entries.into_iter().enumerate() {
        match entry {
            RawEntry::Group(group) => {
                let Some(point) = checked_point(position, Some(group.latitude), Some(group.longitude))
                else {
                    continue;
                };
                if group.courts.is_empty() {
                    tracing::warn!(position, %point, "closest-courts group without courts, skipping");
                    continue;
                }
                let courts = group.courts.into_iter().map(into_court_record).collect();
                groups.push(LocationGroup::new(point, courts));
            }
            RawEntry::Flat(court) => {
                let Some(point) = checked_point(position, court.latitude, court.longitude) else {
                    continue;
                };
                let key = (point.latitude().to_bits(), point.longitude().to_bits());
                let record = into_court_record(court);
                if let Some((_, idx)) = flat_index.iter().find(|(k, _)| *k == key) {
                    groups[*idx].courts.push(record);
                } else {
                    flat_index.push((key, groups.len()));
                    groups.push(LocationGroup::new(point, vec![record]));
                }
            }
        }
    }

    groups
}

fn checked_point(position: usize, lat: Option<f64>, lon: Option<f64>) -> Option<Coordinates> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        tracing::warn!(position, "closest-courts entry without coordinates, skipping");
        return None;
    };
    Coordinates::new(lat, lon)
        .map_err(|e| {
            tracing::warn!(position, error = %e, "closest-courts entry with bad coordinates, skipping");
        })
        .ok()
}

fn into_court_record(raw: RawCourt) -> CourtRecord {
    let image_url = if raw.image_url.is_empty() {
        None
    } else {
        Some(raw.image_url)
    };
    CourtRecord {
        court_type: raw.court_type,
        surface_type: raw.surface_type,
        neighborhood: raw.neighborhood,
        street: raw.street,
        street_number: raw.street_number,
        city: raw.city,
        lighting: raw.lighting,
        availability: raw.availability,
        affiliation: raw.affiliation,
        description: raw.description,
        image_url,
        distance_km: raw.distance.unwrap_or(0.0).max(0.0),
    }
}
