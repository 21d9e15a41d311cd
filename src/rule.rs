//! Rules and the per-rule requirement types.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One AND-combined set of constraints a password may satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Longest allowed run of one literal character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prohibited_substrings: Option<BTreeSet<String>>,

    /// Charsets that must each appear at least once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require: Option<BTreeSet<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_subset: Option<SubsetRequirement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset_requirements: Option<BTreeMap<String, CharsetRequirement>>,
}

fn default_min_length() -> usize {
    1
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: None,
            max_consecutive: None,
            prohibited_substrings: None,
            require: None,
            require_subset: None,
            charset_requirements: None,
        }
    }
}

impl Rule {
    /// Every charset name this rule mentions, wherever it mentions it.
    pub fn referenced_charsets(&self) -> BTreeSet<&str> {
        let mut names: BTreeSet<&str> = BTreeSet::new();
        if let Some(require) = &self.require {
            names.extend(require.iter().map(String::as_str));
        }
        if let Some(options) = self.require_subset.as_ref().and_then(|s| s.options.as_ref()) {
            names.extend(options.iter().map(String::as_str));
        }
        if let Some(reqs) = &self.charset_requirements {
            names.extend(reqs.keys().map(String::as_str));
        }
        names
    }
}

/// At least `count` of the option charsets must appear.
///
/// Without `options` every charset of the policy's table is an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubsetRequirement {
    pub count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeSet<String>>,
}

/// Constraints on a single charset within one rule.
///
/// Locations are character positions: `0` is the first character and `-1`
/// the last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharsetRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_required: Option<usize>,

    /// `Some(0)` forbids the charset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_allowed: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive: Option<usize>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub required_locations: BTreeSet<i64>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub prohibited_locations: BTreeSet<i64>,
}

impl CharsetRequirement {
    /// Whether this entry demands a minimum number of occurrences, or forbids the charset.
    pub(crate) fn imposes_count(&self) -> bool {
        self.min_required.is_some() || self.max_allowed == Some(0)
    }
}
