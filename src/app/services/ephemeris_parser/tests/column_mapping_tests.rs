//! Tests for the column catalog and header layout resolution

use super::super::column_mapping::{
    ColumnDescriptor, ColumnName, HeaderLayout, char_slice, known_column_descriptors,
};
use super::{MERCURY_HEADER, MERCURY_SHORT_ROW, MOON_HEADER, SUN_HEADER, SUN_ROW};
use crate::Error;
use crate::app::models::TimeZoneLabel;

fn value<'l>(values: &[(ColumnName, &'l str)], name: ColumnName) -> Option<&'l str> {
    values
        .iter()
        .find(|(column, _)| *column == name)
        .map(|(_, value)| *value)
}

#[test]
fn test_catalog_is_static_and_well_formed() {
    let descriptors = known_column_descriptors();
    assert_eq!(descriptors.len(), 28);
    assert!(descriptors.iter().all(|descriptor| descriptor.width >= 1));
    assert!(std::ptr::eq(descriptors, known_column_descriptors()));

    let mut names: Vec<_> = descriptors.iter().map(|descriptor| descriptor.name).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), descriptors.len());
}

#[test]
fn test_leading_column_widths_and_offsets() {
    let descriptor = |name: ColumnName| {
        known_column_descriptors()
            .iter()
            .find(|descriptor| descriptor.name == name)
            .unwrap()
    };

    let expected = [
        (ColumnName::Weekday, 2, 0),
        (ColumnName::Date, 10, 2),
        (ColumnName::Timezone, 8, 2),
        (ColumnName::Distance, 8, 1),
    ];
    for (name, width, offset) in expected {
        assert_eq!(descriptor(name).width, width, "{}", name);
        assert_eq!(descriptor(name).offset, offset, "{}", name);
    }
}

#[test]
fn test_date_time_and_distance_start_after_their_labels() {
    let layout = HeaderLayout::resolve(SUN_HEADER).unwrap();
    let column = |name: ColumnName| {
        *layout
            .columns
            .iter()
            .find(|column| column.name == name)
            .unwrap()
    };
    let label_end = |label: &str| SUN_HEADER.find(label).unwrap() + label.len();

    assert_eq!(column(ColumnName::Weekday).start, 2);
    assert_eq!(column(ColumnName::Date).start, label_end("Datum") + 2);
    assert_eq!(column(ColumnName::Date).end, label_end("Datum") + 12);
    assert_eq!(column(ColumnName::Timezone).start, label_end(" MEZ") + 2);

    // Multi-byte characters only appear after the distance label
    assert_eq!(column(ColumnName::Distance).start, label_end("Entf.") + 1);
    assert_eq!(column(ColumnName::Distance).end, label_end("Entf.") + 9);
}

#[test]
fn test_sun_layout() {
    let layout = HeaderLayout::resolve(SUN_HEADER).unwrap();

    use ColumnName::*;
    assert_eq!(
        layout.column_names(),
        vec![
            Weekday,
            Date,
            Timezone,
            RightAscension,
            Declination,
            Rise,
            Culmination,
            Set,
            AzimuthRise,
            AzimuthSet,
            Distance,
            Brightness,
            Diameter,
            Dawn,
            Dusk,
        ]
    );
    assert_eq!(layout.timezone, Some(TimeZoneLabel::Mez));
    assert!(!layout.has_column(Phase));
}

#[test]
fn test_sun_row_slicing() {
    let layout = HeaderLayout::resolve(SUN_HEADER).unwrap();
    let values = layout.slice(SUN_ROW);

    use ColumnName::*;
    let expected = [
        (Weekday, "Mo"),
        (Date, "01.01.2024"),
        (Timezone, "00:00"),
        (RightAscension, "18h43m52.1s"),
        (Declination, "-23°01'12\""),
        (Rise, "8h31m"),
        (Culmination, "12h29m"),
        (Set, "16h27m"),
        (AzimuthRise, "127°"),
        (AzimuthSet, "233°"),
        (Distance, "0.983331"),
        (Brightness, "-26.8"),
        (Diameter, "1951.6"),
        (Dawn, "7h44m"),
        (Dusk, "17h14m"),
    ];
    assert_eq!(values, expected.to_vec());
}

#[test]
fn test_moon_layout_uses_label_groups() {
    let layout = HeaderLayout::resolve(MOON_HEADER).unwrap();

    use ColumnName::*;
    assert_eq!(
        layout.column_names(),
        vec![
            Weekday,
            Date,
            Timezone,
            RightAscension,
            Declination,
            EclipticLongitude,
            EclipticLatitude,
            Rise,
            Culmination,
            Set,
            Distance,
            Brightness,
            Diameter,
            Phase,
            Age,
            PhaseAngle,
            LibrationLongitude,
            LibrationLatitude,
            Colongitude,
            SubsolarLatitude,
        ]
    );
    assert!(!layout.has_column(AzimuthSet));
}

#[test]
fn test_short_line_yields_empty_trailing_values() {
    let layout = HeaderLayout::resolve(MERCURY_HEADER).unwrap();
    let values = layout.slice(MERCURY_SHORT_ROW);

    assert_eq!(value(&values, ColumnName::EarthLatitude), Some("+4.77"));
    assert_eq!(value(&values, ColumnName::CentralMeridian), Some(""));
    assert_eq!(value(&values, ColumnName::Elongation), Some("-23.5"));
}

#[test]
fn test_right_ascension_and_declination_only() {
    let descriptors = vec![
        ColumnDescriptor {
            name: ColumnName::Declination,
            locator: regex::Regex::new(r"Deklin\.").unwrap(),
            width: 10,
            offset: -7,
        },
        ColumnDescriptor {
            name: ColumnName::RightAscension,
            locator: regex::Regex::new(r"Rektasz\.").unwrap(),
            width: 11,
            offset: -8,
        },
    ];

    let header = "   Rektasz.    Deklin.";
    let layout = HeaderLayout::resolve_with(header, &descriptors).unwrap();
    assert_eq!(
        layout.column_names(),
        vec![ColumnName::RightAscension, ColumnName::Declination]
    );
    assert_eq!(layout.timezone, None);
    assert!(!layout.has_column(ColumnName::Date));

    // Ends before the declination column
    let values = layout.slice("   18h43m52.1s ");
    assert_eq!(
        values,
        vec![
            (ColumnName::RightAscension, "18h43m52.1s"),
            (ColumnName::Declination, "")
        ]
    );

    let values = layout.slice("   18h43m52.1s -23°01'12\"");
    assert_eq!(value(&values, ColumnName::Declination), Some("-23°01'12\""));
}

#[test]
fn test_header_without_date_still_resolves() {
    let layout = HeaderLayout::resolve("   Rektasz.    Deklin.").unwrap();
    assert_eq!(
        layout.column_names(),
        vec![ColumnName::RightAscension, ColumnName::Declination]
    );
}

#[test]
fn test_overlapping_columns_are_rejected() {
    let header = "      Datum        MEZ          Rektasz.Deklin.";
    match HeaderLayout::resolve(header) {
        Err(Error::HeaderLayout { header: reported, message }) => {
            assert_eq!(reported, header);
            assert!(message.contains("right_ascension"), "{}", message);
            assert!(message.contains("declination"), "{}", message);
        }
        other => panic!("expected HeaderLayout error, got {:?}", other),
    }
}

#[test]
fn test_column_before_line_start() {
    let descriptors = vec![ColumnDescriptor {
        name: ColumnName::Distance,
        locator: regex::Regex::new(r"Entf\.").unwrap(),
        width: 8,
        offset: -8,
    }];

    match HeaderLayout::resolve_with("Entf.", &descriptors) {
        Err(Error::HeaderLayout { message, .. }) => {
            assert!(message.contains("before the line"), "{}", message)
        }
        other => panic!("expected HeaderLayout error, got {:?}", other),
    }
}

#[test]
fn test_summer_time_and_universal_time_labels() {
    let summer = SUN_HEADER.replace("      MEZ", "     MESZ");
    assert_eq!(
        HeaderLayout::resolve(&summer).unwrap().timezone,
        Some(TimeZoneLabel::Mesz)
    );

    let universal = SUN_HEADER.replace("      MEZ", "       UT");
    assert_eq!(
        HeaderLayout::resolve(&universal).unwrap().timezone,
        Some(TimeZoneLabel::Ut)
    );
}

#[test]
fn test_char_slice_counts_characters() {
    assert_eq!(char_slice("-23°01'12\"", 0, 4), "-23°");
    assert_eq!(char_slice("ADämm", 2, 5), "ämm");
    assert_eq!(char_slice("short", 3, 10), "rt");
    assert_eq!(char_slice("short", 8, 10), "");
    assert_eq!(char_slice("short", 4, 2), "");
}
