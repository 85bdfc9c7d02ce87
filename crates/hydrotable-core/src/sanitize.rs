use crate::markup::MarkupMatch;
use crate::profile::SanitizeProfile;
use serde::{Deserialize, Serialize};

/// Exported in place of an empty cell
pub const PLACEHOLDER: &str = "--";

/// Clean a raw cell value for export.
///
/// Rules from the column's profile are applied until none of them matches,
/// so nested wrappers are removed completely and a second call returns its
/// input unchanged. Values that end up empty become [`PLACEHOLDER`].
pub fn sanitize(raw: Option<&str>, column: usize, profile: &SanitizeProfile) -> String {
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    let column_profile = profile.profile_for(column);
    let mut value = raw.to_string();

    loop {
        let mut changed = false;
        for rule in column_profile.rules() {
            if let MarkupMatch::Matched(text) = rule.apply(&value) {
                value = text;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value
    }
}

/// The export body hook: a [`SanitizeProfile`] bound to [`sanitize`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellSanitizer {
    profile: SanitizeProfile,
}

impl CellSanitizer {
    pub fn new(profile: SanitizeProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &SanitizeProfile {
        &self.profile
    }

    pub fn sanitize(&self, raw: Option<&str>, column: usize) -> String {
        sanitize(raw, column, &self.profile)
    }
}
