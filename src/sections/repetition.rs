//! Repetition section - limits runs of the same literal character.

use crate::classify::ClassifiedPassword;
use crate::rule::Rule;

/// Fails when one character repeats more than `max_consecutive` times in a row.
pub fn repetition_section(password: &ClassifiedPassword<'_>, rule: &Rule) -> bool {
    let Some(max_consecutive) = rule.max_consecutive else {
        return true;
    };

    let chars = password.chars();
    let mut repeated_count = 1;
    for i in 1..chars.len() {
        if chars[i] == chars[i - 1] {
            repeated_count += 1;
            if repeated_count > max_consecutive {
                return false;
            }
        } else {
            repeated_count = 1;
        }
    }
    true
}
