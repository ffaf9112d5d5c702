//! Registry of the objects that can appear in the calendar
//!
//! Lists the sun and every planet of the solar system except the earth (the
//! exports are calculated from it). The moon is included as an experimental
//! entry. Each entry maps a [`CelestialBody`] key to a static
//! [`ObservableObject`] record; block names in an export are resolved through
//! the records' aliases.

use crate::app::models::ObservableObject;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

static SUN: ObservableObject = ObservableObject::known("sun", &["Sonne"], "orange");
static MERCURY: ObservableObject = ObservableObject::known("mercury", &["Merkur"], "black");
static VENUS: ObservableObject = ObservableObject::known("venus", &["Venus"], "green");
// experimental, may get dropped if it turns out too wonky
static MOON: ObservableObject = ObservableObject::known("moon", &["Mond"], "violet");
static MARS: ObservableObject = ObservableObject::known("mars", &["Mars"], "red");
static JUPITER: ObservableObject = ObservableObject::known("jupiter", &["Jupiter"], "blue");
static SATURN: ObservableObject = ObservableObject::known("saturn", &["Saturn"], "pink");
static URANUS: ObservableObject = ObservableObject::known("uranus", &["Uranus"], "turquoise");
static NEPTUNE: ObservableObject = ObservableObject::known("neptune", &["Neptun"], "gold");

/// Key of every known object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CelestialBody {
    Sun,
    Mercury,
    Venus,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl CelestialBody {
    /// Every known object in lookup order
    pub const ALL: [CelestialBody; 9] = [
        CelestialBody::Sun,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Moon,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
    ];

    /// The object's identity and display attributes
    pub fn object(self) -> &'static ObservableObject {
        match self {
            CelestialBody::Sun => &SUN,
            CelestialBody::Mercury => &MERCURY,
            CelestialBody::Venus => &VENUS,
            CelestialBody::Moon => &MOON,
            CelestialBody::Mars => &MARS,
            CelestialBody::Jupiter => &JUPITER,
            CelestialBody::Saturn => &SATURN,
            CelestialBody::Uranus => &URANUS,
            CelestialBody::Neptune => &NEPTUNE,
        }
    }

    /// Look up the key of an object record
    pub fn of(object: &ObservableObject) -> Option<CelestialBody> {
        Self::ALL
            .into_iter()
            .find(|body| body.object().internal_id == object.internal_id)
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.object().internal_id)
    }
}

/// Every known object record in lookup order
pub fn known_objects() -> impl Iterator<Item = &'static ObservableObject> {
    CelestialBody::ALL.into_iter().map(CelestialBody::object)
}

/// Retrieve the object a given alias belongs to
///
/// Matching is exact and case-sensitive; the first object whose alias set
/// (which includes its lowercase id) contains `alias` wins. "Sonne" and "sun"
/// both resolve to the sun, "SUN" does not.
pub fn resolve_alias(alias: &str) -> Result<&'static ObservableObject> {
    let object = known_objects()
        .find(|object| object.has_alias(alias))
        .ok_or_else(|| Error::alias_not_assigned(alias))?;

    debug!("Resolved alias '{}' to '{}'", alias, object.internal_id);
    Ok(object)
}
