//! Document grammar for almanac exports
//!
//! Two top-level recognizers built from the fragment library: the metadata
//! line (`Ort: <place>, <coordinate> [Äquin: <equinox>, geozentrisch], DeltaT = <n> <unit>`)
//! and the object block (name line, header line, body lines up to an empty line).

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::ops::Range;

use super::patterns::{DMS_COORDINATE, FragmentOptions, PatternFragment};

lazy_static! {
    /// Metadata line, case-insensitive and multi-line
    pub static ref METADATA: PatternFragment = {
        let pattern = format!(
            r"^Ort:\s*(?P<place>[^,\n]+),\s*(?P<coordinate>{})\s*(\sÄquin:\s*(?P<equinox>-?\d+(\.\d+)?),\s*geozentrisch)?,\s*DeltaT\s?=\s?(?P<delta_t>-?\d+(\.\d+)?)\s?(?P<delta_t_unit>\w+)$",
            DMS_COORDINATE.source()
        );
        PatternFragment::compose_with(&pattern, FragmentOptions::case_insensitive().multi_line())
            .expect("valid metadata pattern")
    };

    /// Object block: `<name>\n<header>\n<body>\n` followed by an empty line or the end
    ///
    /// The final body line must be terminated by a newline, otherwise the block
    /// does not match at all.
    pub static ref OBJECT_BLOCK: Regex = Regex::new(
        r"(?m)^(?P<name>\S+)\n(?P<header>[^\n]+)\n(?P<body>[^\n]+(?:\n[^\n]+)*)\n(?:\n|\z)",
    )
    .expect("valid object block pattern");
}

/// Raw captures of a metadata line
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataCaptures<'t> {
    pub place: &'t str,
    pub coordinate: &'t str,
    pub lat: &'t str,
    pub lon: &'t str,
    pub equinox: Option<&'t str>,
    pub delta_t: &'t str,
    pub delta_t_unit: &'t str,
}

impl<'t> MetadataCaptures<'t> {
    fn from_captures(caps: &Captures<'t>) -> Option<Self> {
        Some(Self {
            place: caps.name("place")?.as_str(),
            coordinate: caps.name("coordinate")?.as_str(),
            lat: caps.name("lat")?.as_str(),
            lon: caps.name("lon")?.as_str(),
            equinox: caps.name("equinox").map(|m| m.as_str()),
            delta_t: caps.name("delta_t")?.as_str(),
            delta_t_unit: caps.name("delta_t_unit")?.as_str(),
        })
    }
}

/// Match a single metadata line
pub fn match_metadata(line: &str) -> Option<MetadataCaptures<'_>> {
    METADATA
        .captures(line)
        .and_then(|caps| MetadataCaptures::from_captures(&caps))
}

/// Find the first metadata line anywhere in a document
pub fn find_metadata(document: &str) -> Option<MetadataCaptures<'_>> {
    METADATA
        .regex()
        .captures_iter(document)
        .find_map(|caps| MetadataCaptures::from_captures(&caps))
}

/// One object block of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBlock<'t> {
    /// Alias of the object (e.g., "Sonne")
    pub name: &'t str,
    /// Column label line
    pub header: &'t str,
    /// Data lines, without the terminating newline
    pub body: &'t str,
    /// Byte range of the whole match in the document
    pub span: Range<usize>,
}

impl<'t> ObjectBlock<'t> {
    /// Data lines of the block
    pub fn rows(&self) -> impl Iterator<Item = &'t str> + 't {
        self.body.split('\n')
    }
}

/// Iterate over the object blocks of a document in order
pub fn object_blocks(document: &str) -> impl Iterator<Item = ObjectBlock<'_>> + '_ {
    OBJECT_BLOCK.captures_iter(document).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(ObjectBlock {
            name: caps.name("name")?.as_str(),
            header: caps.name("header")?.as_str(),
            body: caps.name("body")?.as_str(),
            span: whole.start()..whole.end(),
        })
    })
}
