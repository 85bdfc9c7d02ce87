use crate::markup::MarkupRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Markup rules applied to one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnProfile {
    rules: Vec<MarkupRule>,
}

impl ColumnProfile {
    /// A column whose values are exported as-is
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, rule: MarkupRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    pub fn strips(&self, rule: MarkupRule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn is_none(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in application order, regardless of insertion order
    pub fn rules(&self) -> impl Iterator<Item = MarkupRule> + '_ {
        MarkupRule::ALL.into_iter().filter(|rule| self.strips(*rule))
    }
}

/// Column index to [`ColumnProfile`] mapping for a whole table.
///
/// The mapping is total: columns without an override use `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeProfile {
    pub default: ColumnProfile,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<usize, ColumnProfile>,
}

impl SanitizeProfile {
    /// Only the empty-value placeholder applies
    pub fn placeholder_only() -> Self {
        Self::default()
    }

    /// Station listing tables: linked values and symbol images in every
    /// column, site numbers wrapped in a span in the first column
    pub fn station_links() -> Self {
        let links = ColumnProfile::none()
            .with(MarkupRule::AnchorWrapper)
            .with(MarkupRule::SymbolImage);
        Self::new(links.clone()).with_column(0, links.with(MarkupRule::SiteNumberSpan))
    }

    pub fn new(default: ColumnProfile) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_column(mut self, column: usize, profile: ColumnProfile) -> Self {
        self.overrides.insert(column, profile);
        self
    }

    pub fn profile_for(&self, column: usize) -> &ColumnProfile {
        self.overrides.get(&column).unwrap_or(&self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_links_mapping() {
        let profile = SanitizeProfile::station_links();
        assert!(profile.profile_for(0).strips(MarkupRule::SiteNumberSpan));
        assert!(profile.profile_for(0).strips(MarkupRule::AnchorWrapper));
        assert!(!profile.profile_for(1).strips(MarkupRule::SiteNumberSpan));
        assert!(profile.profile_for(1).strips(MarkupRule::SymbolImage));
        assert!(profile.profile_for(500).strips(MarkupRule::AnchorWrapper));
    }

    #[test]
    fn test_placeholder_only_strips_nothing() {
        let profile = SanitizeProfile::placeholder_only();
        assert!(profile.profile_for(0).is_none());
        assert!(profile.profile_for(7).is_none());
    }

    #[test]
    fn test_rules_follow_application_order() {
        let profile = ColumnProfile::none()
            .with(MarkupRule::SymbolImage)
            .with(MarkupRule::AnchorWrapper)
            .with(MarkupRule::AnchorWrapper);
        let rules: Vec<_> = profile.rules().collect();
        assert_eq!(rules, vec![MarkupRule::AnchorWrapper, MarkupRule::SymbolImage]);
    }

    #[test]
    fn test_profile_from_json() {
        let json = r#"{"default": ["anchor_wrapper"], "overrides": {"0": ["site_number_span"]}}"#;
        let profile: SanitizeProfile = serde_json::from_str(json).unwrap();
        assert!(profile.profile_for(0).strips(MarkupRule::SiteNumberSpan));
        assert!(!profile.profile_for(0).strips(MarkupRule::AnchorWrapper));
        assert!(profile.profile_for(3).strips(MarkupRule::AnchorWrapper));
    }
}
