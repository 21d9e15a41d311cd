//! The policy: ordered rules over one charset table.

use crate::charsets::{CharsetTable, Preset};
use crate::rule::Rule;

/// A password composition policy.
///
/// A password satisfies the policy when it satisfies any of its rules.
/// Construction never fails; call [`Policy::validate`] before trusting a
/// policy built by hand or parsed from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    rules: Vec<Rule>,
    charsets: CharsetTable,
}

impl Policy {
    /// Creates a policy over the preset the rules imply.
    ///
    /// The alphabet preset is used when any rule references `alphabet`,
    /// the default preset otherwise.
    pub fn new(rules: Vec<Rule>) -> Self {
        let charsets = Preset::infer(&rules).table();
        Self { rules, charsets }
    }

    pub fn with_charsets(rules: Vec<Rule>, charsets: CharsetTable) -> Self {
        Self { rules, charsets }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn charsets(&self) -> &CharsetTable {
        &self.charsets
    }
}

impl From<Rule> for Policy {
    fn from(rule: Rule) -> Self {
        Policy::new(vec![rule])
    }
}
