//! Charset requirements section - per-charset counts, runs and locations.

use crate::classify::ClassifiedPassword;
use crate::rule::{CharsetRequirement, Rule};

/// Checks every charset requirement of the rule.
///
/// Locations outside the password are vacuously satisfied.
pub fn charset_requirements_section(password: &ClassifiedPassword<'_>, rule: &Rule) -> bool {
    rule.charset_requirements
        .iter()
        .flatten()
        .all(|(name, req)| match password.class_of(name) {
            Some(class) => requirement_holds(password, class, req),
            None => false,
        })
}

fn requirement_holds(password: &ClassifiedPassword<'_>, class: usize, req: &CharsetRequirement) -> bool {
    let count = password.count(class);
    if req.min_required.is_some_and(|min| count < min) {
        return false;
    }
    if req.max_allowed.is_some_and(|max| count > max) {
        return false;
    }
    if req
        .max_consecutive
        .is_some_and(|max| password.longest_run(class) > max)
    {
        return false;
    }

    let required_ok = req
        .required_locations
        .iter()
        .all(|&location| password.class_at(location).is_none_or(|c| c == class));
    let prohibited_ok = req
        .prohibited_locations
        .iter()
        .all(|&location| password.class_at(location) != Some(class));

    required_ok && prohibited_ok
}
