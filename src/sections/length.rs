//! Length section - checks the rule's length bounds.

use crate::classify::ClassifiedPassword;
use crate::rule::Rule;

/// Checks `min_length <= len <= max_length`, counting characters.
pub fn length_section(password: &ClassifiedPassword<'_>, rule: &Rule) -> bool {
    let len = password.len();
    len >= rule.min_length && rule.max_length.is_none_or(|max| len <= max)
}
