//! Tests for parsing statistics and result structures

use super::super::stats::{BlockFailure, ParseStats};
use super::{COMPLETE_EXPORT, create_parser};
use crate::app::services::object_registry::CelestialBody;

#[test]
fn test_parse_stats_calculation() {
    let stats = ParseStats {
        blocks_found: 4,
        blocks_parsed: 3,
        rows_parsed: 120,
        failures: vec![BlockFailure {
            object: "Pluto".to_string(),
            row: None,
            message: "The alias 'Pluto' is not set for any observable object".to_string(),
        }],
        dropped_trailing_text: None,
    };

    assert_eq!(stats.success_rate(), 75.0);
    assert!(!stats.is_successful());
}

#[test]
fn test_parse_stats_empty() {
    let empty_stats = ParseStats::new();

    assert_eq!(empty_stats.blocks_found, 0);
    assert_eq!(empty_stats.blocks_parsed, 0);
    assert_eq!(empty_stats.rows_parsed, 0);
    assert!(empty_stats.failures.is_empty());
    assert_eq!(empty_stats.success_rate(), 0.0);
    assert!(!empty_stats.is_successful());
}

#[test]
fn test_parse_stats_perfect() {
    let perfect_stats = ParseStats {
        blocks_found: 9,
        blocks_parsed: 9,
        rows_parsed: 333,
        failures: vec![],
        dropped_trailing_text: None,
    };

    assert_eq!(perfect_stats.success_rate(), 100.0);
    assert!(perfect_stats.is_successful());

    let dropped = ParseStats {
        dropped_trailing_text: Some("Neptun".to_string()),
        ..perfect_stats
    };
    assert!(!dropped.is_successful());
}

#[test]
fn test_result_into_map() {
    let result = create_parser().parse_str(COMPLETE_EXPORT).unwrap();
    let map = result.into_map();

    assert_eq!(map.len(), 3);
    assert_eq!(map[CelestialBody::Sun.object()].len(), 3);
    assert_eq!(map[CelestialBody::Mercury.object()].len(), 2);
    assert!(!map.contains_key(CelestialBody::Mars.object()));
}
