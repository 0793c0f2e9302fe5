//! Terminal rendering of the search view state.

use courtfinder_core::{CourtRecord, LocationGroup, SearchViewState};

pub(crate) fn print_state(state: &SearchViewState, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        println!("{}", render_state(state));
    }
    Ok(())
}

/// Human-readable summary: warning first, then one block per location.
pub(crate) fn render_state(state: &SearchViewState) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !state.address_text.is_empty() {
        lines.push(format!("address: {}", state.address_text));
    }
    if let Some(warning) = &state.warning_message {
        lines.push(format!("warning: {warning}"));
    }
    if state.result_groups.is_empty() {
        if state.warning_message.is_none() {
            lines.push("no courts to show".to_owned());
        }
        return lines.join("\n");
    }

    lines.push(format!(
        "{} courts at {} locations near {}",
        state.court_count(),
        state.result_groups.len(),
        state.map_center
    ));
    for (index, group) in state.result_groups.iter().enumerate() {
        lines.push(String::new());
        lines.extend(group_lines(index + 1, group));
    }
    lines.join("\n")
}

fn group_lines(number: usize, group: &LocationGroup) -> Vec<String> {
    let title = group
        .resolved_address
        .clone()
        .or_else(|| group.courts.first().map(CourtRecord::street_address))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| group.coordinates.to_string());

    let mut lines = vec![format!("{number}. {title}")];
    lines.extend(
        group
            .courts
            .iter()
            .map(|court| format!("   - {}", describe_court(court))),
    );

    let links = group.navigation_links();
    lines.push(format!("   waze:        {}", links.waze));
    lines.push(format!("   google maps: {}", links.google_maps));
    lines
}

fn describe_court(court: &CourtRecord) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !court.court_type.is_empty() {
        parts.push(court.court_type.clone());
    }
    if !court.surface_type.is_empty() {
        parts.push(court.surface_type.clone());
    }
    parts.push(if court.lighting { "lit" } else { "unlit" }.to_owned());
    parts.push(format!("{:.2} km", court.distance_km));
    if !court.neighborhood.is_empty() {
        parts.push(court.neighborhood.clone());
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use courtfinder_core::{Coordinates, DEFAULT_CENTER};

    use super::*;

    fn court() -> CourtRecord {
        CourtRecord {
            court_type: "basketball court".to_owned(),
            surface_type: "asphalt".to_owned(),
            neighborhood: "Center".to_owned(),
            street: "Dizengoff".to_owned(),
            street_number: "101".to_owned(),
            city: "Tel Aviv".to_owned(),
            lighting: true,
            availability: String::new(),
            affiliation: String::new(),
            description: String::new(),
            image_url: None,
            distance_km: 0.123,
        }
    }

    #[test]
    fn empty_state_without_warning() {
        let state = SearchViewState::initial(DEFAULT_CENTER);
        assert_eq!(render_state(&state), "no courts to show");
    }

    #[test]
    fn warning_is_printed_before_results() {
        let mut state = SearchViewState::initial(DEFAULT_CENTER);
        state.warning_message = Some("found only 1 matching courts".to_owned());
        state.result_groups = vec![LocationGroup::new(
            Coordinates::new(32.081, 34.781).unwrap(),
            vec![court()],
        )];

        let rendered = render_state(&state);
        let warning_at = rendered.find("warning:").unwrap();
        let group_at = rendered.find("1. Dizengoff 101, Tel Aviv").unwrap();
        assert!(warning_at < group_at, "{rendered}");
        assert!(rendered.contains("basketball court, asphalt, lit, 0.12 km, Center"));
        assert!(rendered.contains("https://waze.com/ul?ll=32.081,34.781&navigate=yes"));
    }

    #[test]
    fn resolved_address_is_preferred_as_title() {
        let mut group = LocationGroup::new(Coordinates::new(32.1, 34.8).unwrap(), vec![court()]);
        group.resolved_address = Some("Rothschild Blvd 1".to_owned());
        let mut state = SearchViewState::initial(DEFAULT_CENTER);
        state.result_groups = vec![group];

        let rendered = render_state(&state);
        assert!(rendered.lines().any(|l| l == "1. Rothschild Blvd 1"), "{rendered}");
    }
}
