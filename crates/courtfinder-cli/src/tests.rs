use super::*;

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from(["courtfinder", "search", "Dizengoff 100, Tel Aviv"])
        .expect("expected valid cli args");

    let Commands::Search {
        address,
        filters,
        json,
    } = cli.command
    else {
        panic!("expected search command");
    };
    assert_eq!(address, "Dizengoff 100, Tel Aviv");
    assert!(!json);
    assert_eq!(filters.court_type, CourtType::All);
    assert_eq!(filters.surface, "");
    assert!(filters.count.is_none());
}

#[test]
fn parses_search_filters() {
    let cli = Cli::try_parse_from([
        "courtfinder",
        "search",
        "Ibn Gabirol 30",
        "--type",
        "basketball",
        "--surface",
        "synthetic grass",
        "--lighting",
        "--exclude-mixed",
        "--count",
        "8",
        "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search {
            filters: FilterArgs {
                court_type: CourtType::Basketball,
                lighting: true,
                exclude_mixed: true,
                count: Some(8),
                ..
            },
            json: true,
            ..
        }
    ));
}

#[test]
fn unknown_court_type_is_rejected() {
    let result = Cli::try_parse_from(["courtfinder", "search", "x", "--type", "tennis"]);
    assert!(result.is_err());
}

#[test]
fn search_requires_address() {
    assert!(Cli::try_parse_from(["courtfinder", "search"]).is_err());
}

#[test]
fn parses_locate_with_position() {
    let cli = Cli::try_parse_from([
        "courtfinder",
        "locate",
        "--lat",
        "32.07",
        "--lon",
        "34.77",
        "--type",
        "football",
    ])
    .expect("expected valid cli args");

    let Commands::Locate {
        lat, lon, filters, ..
    } = cli.command
    else {
        panic!("expected locate command");
    };
    assert_eq!(lat, Some(32.07));
    assert_eq!(lon, Some(34.77));
    assert_eq!(filters.court_type, CourtType::Football);
}

#[test]
fn locate_accepts_negative_longitude() {
    let cli = Cli::try_parse_from(["courtfinder", "locate", "--lat", "40.7", "--lon", "-74.0"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Locate { lon: Some(l), .. } if l < 0.0));
}

#[test]
fn locate_without_position_is_allowed() {
    let cli = Cli::try_parse_from(["courtfinder", "locate"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Locate {
            lat: None,
            lon: None,
            ..
        }
    ));
}

#[test]
fn locate_lat_requires_lon() {
    assert!(Cli::try_parse_from(["courtfinder", "locate", "--lat", "32.0"]).is_err());
}

#[test]
fn filter_args_fall_back_to_configured_count_and_clamp() {
    let args = FilterArgs {
        court_type: CourtType::Volleyball,
        surface: String::new(),
        lighting: false,
        exclude_mixed: false,
        count: None,
    };
    assert_eq!(args.into_filters(7).desired_count, 7);

    let args = FilterArgs {
        court_type: CourtType::Volleyball,
        surface: String::new(),
        lighting: false,
        exclude_mixed: false,
        count: Some(99),
    };
    assert_eq!(args.into_filters(5).desired_count, 20);
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["courtfinder"]).is_err());
}
