//! Pattern fragment library
//!
//! Primitive recognizers for times of day, degree angles, degree-minute-second
//! angles and coordinate pairs. Fragments are composed at string level: the
//! anchor-free source of one fragment is embedded into a larger pattern, and
//! named groups are renamed with a suffix when the same fragment is embedded
//! twice.

use lazy_static::lazy_static;
use regex::{Captures, Regex, RegexBuilder};

use crate::constants::{
    ALLOWED_LATITUDE_HEMISPHERES, ALLOWED_LONGITUDE_HEMISPHERES, LATITUDE_GROUP_SUFFIX,
    LONGITUDE_GROUP_SUFFIX,
};
use crate::{Error, Result};

/// A compiled recognizer together with its anchor-free source text
#[derive(Debug, Clone)]
pub struct PatternFragment {
    regex: Regex,
    source: String,
}

/// Matching options for [`PatternFragment::compose_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FragmentOptions {
    pub case_insensitive: bool,
    pub multi_line: bool,
}

impl FragmentOptions {
    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
            multi_line: false,
        }
    }

    pub fn multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }
}

impl PatternFragment {
    /// Compile `base` and keep its anchor-free source for embedding
    pub fn compose(base: &str, case_insensitive: bool) -> Result<Self> {
        Self::compose_with(
            base,
            FragmentOptions {
                case_insensitive,
                multi_line: false,
            },
        )
    }

    /// Compile `base` with explicit matching options
    pub fn compose_with(base: &str, options: FragmentOptions) -> Result<Self> {
        let regex = RegexBuilder::new(base)
            .case_insensitive(options.case_insensitive)
            .multi_line(options.multi_line)
            .build()
            .map_err(|e| Error::pattern(format!("Failed to compile pattern '{}'", base), e))?;

        Ok(Self {
            regex,
            source: extract(base).to_string(),
        })
    }

    /// Compiled recognizer (anchored if the base pattern was)
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Source text without anchors, ready to be embedded
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Captures of the recognizer applied to `text`
    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(text)
    }

    /// Whether `text` as a whole has the fragment's shape
    pub fn matches_whole(&self, text: &str) -> bool {
        self.regex
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len())
    }
}

/// Strip one leading `^` and one unescaped trailing `$` from a pattern
pub fn extract(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);

    match pattern.strip_suffix('$') {
        Some(stripped) => {
            let escapes = stripped.chars().rev().take_while(|c| *c == '\\').count();
            if escapes % 2 == 0 { stripped } else { pattern }
        }
        None => pattern,
    }
}

/// Anchor-free source text of a compiled fragment
pub fn extract_fragment(fragment: &PatternFragment) -> &str {
    fragment.source()
}

lazy_static! {
    static ref GROUP_NAME: Regex =
        Regex::new(r"\(\?P?<(?P<name>[A-Za-z_][A-Za-z0-9_]*)>").expect("valid group name regex");
}

/// Append `suffix` to the name of every named capture group in `pattern`
///
/// Group bodies are left untouched and the suffix is inserted literally, so it
/// can be used to embed two copies of one fragment side by side.
pub fn rename_groups(suffix: &str, pattern: &str) -> String {
    if suffix.is_empty() {
        return pattern.to_string();
    }

    GROUP_NAME
        .replace_all(pattern, |caps: &Captures| {
            format!("(?P<{}{}>", &caps["name"], suffix)
        })
        .into_owned()
}

// =============================================================================
// Primitive Fragments
// =============================================================================

/// `<hour>h<minute>m`, hour 0-24 and minute 0-60 (60 occurs near day boundaries)
pub const HM_TIME_PATTERN: &str = r"^(?P<hour>[01]?\d|2[0-4])h(?P<minute>[0-5]?\d|60)m$";

/// `<hour>h<minute>m<second>s` right ascension
pub const HMS_ANGLE_PATTERN: &str =
    r"^(?P<hour>[01]?\d|2[0-3])h(?P<minute>[0-5]\d)m(?P<second>[0-5]\d(\.\d+)?)s$";

/// Signed degree, -90° to +90°
pub const DEGREE_SIGNED_90_PATTERN: &str = r"^(?P<sign>[+\-])\s?(?P<degree>[0-8]?\d|90)°$";

/// Unsigned degree, 0° to 180°
pub const DEGREE_180_PATTERN: &str = r"^(?P<degree>0?\d?\d|1[0-7]\d|180)°$";

/// Unsigned degree, 0° to 360°
pub const DEGREE_360_PATTERN: &str = r"^(?P<degree>[0-2]?\d?\d|3[0-5]\d|360)°$";

/// Minutes and optional seconds following a degree sign
const ARC_MINUTES_SECONDS: &str =
    r#"((?P<minute>\s?([0-5 ])?\d)'(\s?(?P<second>(([0-5 ])?\d|60)(\.\d+)?)")?)?"#;

fn build(pattern: &str, case_insensitive: bool) -> PatternFragment {
    PatternFragment::compose(pattern, case_insensitive).expect("valid fragment pattern")
}

lazy_static! {
    pub static ref HM_TIME: PatternFragment = build(HM_TIME_PATTERN, true);

    /// Either a time of day or a run of dashes (value not available)
    pub static ref OPTIONAL_HM_TIME: PatternFragment =
        build(&format!("^({}|-+)$", extract(HM_TIME_PATTERN)), true);

    pub static ref HMS_ANGLE: PatternFragment = build(HMS_ANGLE_PATTERN, true);

    pub static ref DEGREE_SIGNED_90: PatternFragment = build(DEGREE_SIGNED_90_PATTERN, true);

    pub static ref DEGREE_180: PatternFragment = build(DEGREE_180_PATTERN, true);

    pub static ref DEGREE_360: PatternFragment = build(DEGREE_360_PATTERN, true);

    /// Signed degrees/minutes/seconds, -90° to +90°
    pub static ref DMS_ANGLE_90: PatternFragment = build(
        &format!(
            r"^(?P<sign>[+\-])(?P<degree>[0-8 ]?\d|90)°{}$",
            ARC_MINUTES_SECONDS
        ),
        true,
    );

    /// Unsigned degrees/minutes/seconds, 0° to 360°
    pub static ref DMS_ANGLE_360: PatternFragment = build(
        &format!(
            r"^(?P<degree>[0-2 ]?[\d ]?\d|3[0-5]\d|360)°{}$",
            ARC_MINUTES_SECONDS
        ),
        true,
    );

    /// Latitude and longitude, each a 360° DMS angle plus hemisphere letter
    pub static ref DMS_COORDINATE: PatternFragment = {
        let angle = DMS_ANGLE_360.source();
        build(
            &format!(
                r"^(?P<lat>({}\s?([{}])))(\s*,\s*)?\s+(?P<lon>({}\s?([{}])))$",
                rename_groups(LATITUDE_GROUP_SUFFIX, angle),
                hemisphere_class(ALLOWED_LATITUDE_HEMISPHERES),
                rename_groups(LONGITUDE_GROUP_SUFFIX, angle),
                hemisphere_class(ALLOWED_LONGITUDE_HEMISPHERES),
            ),
            true,
        )
    };
}

fn hemisphere_class(letters: &[char]) -> String {
    letters.iter().collect()
}
