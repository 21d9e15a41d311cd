//! Substrings section - rejects passwords containing prohibited text.

use crate::classify::ClassifiedPassword;
use crate::rule::Rule;

pub fn substrings_section(password: &ClassifiedPassword<'_>, rule: &Rule) -> bool {
    rule.prohibited_substrings
        .iter()
        .flatten()
        .all(|needle| !password.raw().contains(needle.as_str()))
}
