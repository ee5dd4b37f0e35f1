//! Version bump rules.

use crate::model::{Delta, Version};

/// Suggested version for a unit, with an optional warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// `None` when the unit was removed
    pub version: Option<Version>,
    pub warning: Option<String>,
}

/// Suggest a unit version for `delta` on top of the older declared version.
///
/// An unchanged unit keeps the older version unless that carries a qualifier,
/// in which case the micro part is bumped so the release is distinguishable.
#[must_use]
pub fn suggest(delta: Delta, older: &Version, newer: &Version) -> Suggestion {
    match delta {
        Delta::Ignored | Delta::Unchanged if older.is_qualified() => {
            let version = older.next_micro();
            Suggestion {
                warning: Some(format!(
                    "The baseline version {older} has a qualifier, bumping micro to {version}"
                )),
                version: Some(version),
            }
        }
        Delta::Removed => Suggestion {
            version: None,
            warning: None,
        },
        Delta::Added => plain(newer.clone()),
        _ => plain(bump(delta, older)),
    }
}

fn plain(version: Version) -> Suggestion {
    Suggestion {
        version: Some(version),
        warning: None,
    }
}

/// Bump for an ordinal severity, without qualifier handling.
#[must_use]
pub fn bump(delta: Delta, older: &Version) -> Version {
    match delta {
        Delta::Major => older.next_major(),
        Delta::Minor => older.next_minor(),
        Delta::Changed | Delta::Micro => older.next_micro(),
        Delta::Ignored | Delta::Unchanged | Delta::Added | Delta::Removed => older.clone(),
    }
}

/// Component bump: `Major`, `Minor`, anything else bumps micro.
#[must_use]
pub fn component_bump(highest: Delta, older: &Version) -> Version {
    match highest {
        Delta::Major => older.next_major(),
        Delta::Minor => older.next_minor(),
        _ => older.next_micro(),
    }
}
