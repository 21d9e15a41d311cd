//! Consistency checks over a whole policy.
//!
//! Validation walks the policy tree in a fixed order and stops at the first
//! violation. Every error carries the path of the offending node.

use std::collections::{BTreeMap, BTreeSet};

use crate::charsets::CharsetTable;
use crate::error::ConsistencyError;
use crate::policy::Policy;
use crate::rule::{CharsetRequirement, Rule, SubsetRequirement};

type ValidationResult = Result<(), ConsistencyError>;

impl Policy {
    /// Checks that the policy is free of contradictions.
    ///
    /// # Errors
    /// Returns the first [`ConsistencyError`] found, in this order: empty
    /// charsets, overlapping charsets, missing rules, then each rule in turn.
    pub fn validate(&self) -> ValidationResult {
        let result = validate_policy(self);

        #[cfg(feature = "tracing")]
        {
            if let Err(e) = &result {
                tracing::warn!("Policy failed validation: {}", e);
            }
        }

        result
    }
}

fn validate_policy(policy: &Policy) -> ValidationResult {
    validate_charsets(policy.charsets())?;

    if policy.rules().is_empty() {
        return Err(ConsistencyError::new("rules", "policy must have at least one rule"));
    }

    for (i, rule) in policy.rules().iter().enumerate() {
        validate_rule(rule, &format!("rules[{i}]"), policy.charsets())?;
    }
    Ok(())
}

fn validate_charsets(table: &CharsetTable) -> ValidationResult {
    for (name, set) in table.iter() {
        if set.is_empty() {
            return Err(ConsistencyError::new(
                format!("charsets[{name}]"),
                "charset must not be empty",
            ));
        }
    }

    let entries: Vec<_> = table.iter().collect();
    for (i, (a, a_set)) in entries.iter().enumerate() {
        for (b, b_set) in &entries[i + 1..] {
            let shared: String = a_set.intersection(b_set).collect();
            if !shared.is_empty() {
                return Err(ConsistencyError::new(
                    "charsets",
                    format!("charsets '{a}' and '{b}' share characters {shared:?}"),
                ));
            }
        }
    }
    Ok(())
}

fn validate_rule(rule: &Rule, path: &str, table: &CharsetTable) -> ValidationResult {
    if rule.min_length < 1 {
        return Err(ConsistencyError::new(
            format!("{path}.min_length"),
            "must be at least 1",
        ));
    }

    if let Some(max_length) = rule.max_length {
        if max_length < rule.min_length {
            return Err(ConsistencyError::new(
                format!("{path}.max_length"),
                format!("{max_length} is less than min_length {}", rule.min_length),
            ));
        }
    }

    if rule.max_consecutive == Some(0) {
        return Err(ConsistencyError::new(
            format!("{path}.max_consecutive"),
            "must be at least 1",
        ));
    }

    if let Some(substrings) = &rule.prohibited_substrings {
        if substrings.iter().any(String::is_empty) {
            return Err(ConsistencyError::new(
                format!("{path}.prohibited_substrings"),
                "the empty string would reject every password",
            ));
        }
    }

    if let Some(name) = first_unknown(names_of(&rule.require), table) {
        return Err(ConsistencyError::new(
            format!("{path}.require"),
            format!("unknown charset '{name}'"),
        ));
    }

    if let Some(subset) = &rule.require_subset {
        validate_subset(subset, &format!("{path}.require_subset"), table)?;
    }

    if let Some(reqs) = &rule.charset_requirements {
        for (name, req) in reqs {
            let req_path = format!("{path}.charset_requirements[{name}]");
            if !table.contains(name) {
                return Err(ConsistencyError::new(req_path, "unknown charset"));
            }
            validate_charset_requirement(req, &req_path, rule)?;
        }
        validate_shared_locations(reqs, path)?;
    }

    validate_obligations(rule, path, table)
}

fn validate_subset(subset: &SubsetRequirement, path: &str, table: &CharsetTable) -> ValidationResult {
    if subset.count < 1 {
        return Err(ConsistencyError::new(
            format!("{path}.count"),
            "must be at least 1",
        ));
    }

    let available = match &subset.options {
        Some(options) => {
            if options.len() < 2 {
                return Err(ConsistencyError::new(
                    format!("{path}.options"),
                    "must name at least 2 charsets",
                ));
            }
            if let Some(name) = first_unknown(options.iter().map(String::as_str), table) {
                return Err(ConsistencyError::new(
                    format!("{path}.options"),
                    format!("unknown charset '{name}'"),
                ));
            }
            options.len()
        }
        None => table.len(),
    };

    if subset.count >= available {
        return Err(ConsistencyError::new(
            format!("{path}.count"),
            format!(
                "{} must be less than the {available} available options; use require instead",
                subset.count
            ),
        ));
    }
    Ok(())
}

fn validate_charset_requirement(req: &CharsetRequirement, path: &str, rule: &Rule) -> ValidationResult {
    if req.min_required == Some(0) {
        return Err(ConsistencyError::new(path, "min_required must be at least 1"));
    }
    if req.max_consecutive == Some(0) {
        return Err(ConsistencyError::new(path, "max_consecutive must be at least 1"));
    }

    if let Some(max_allowed) = req.max_allowed {
        if let Some(min_required) = req.min_required {
            if max_allowed < min_required {
                return Err(ConsistencyError::new(
                    path,
                    format!("max_allowed {max_allowed} is less than min_required {min_required}"),
                ));
            }
        }
        if max_allowed < req.required_locations.len() {
            return Err(ConsistencyError::new(
                path,
                format!(
                    "max_allowed {max_allowed} is less than the {} required locations",
                    req.required_locations.len()
                ),
            ));
        }
    }

    if let (Some(min_required), Some(max_length)) = (req.min_required, rule.max_length) {
        if min_required > max_length {
            return Err(ConsistencyError::new(
                path,
                format!("min_required {min_required} exceeds the rule's max_length {max_length}"),
            ));
        }
    }

    if let Some(location) = req
        .required_locations
        .intersection(&req.prohibited_locations)
        .next()
    {
        return Err(ConsistencyError::new(
            path,
            format!("location {location} is both required and prohibited"),
        ));
    }

    for &location in &req.required_locations {
        if !location_guaranteed(location, rule.min_length) {
            return Err(ConsistencyError::new(
                path,
                format!(
                    "required location {location} may not exist with min_length {}",
                    rule.min_length
                ),
            ));
        }
    }
    Ok(())
}

/// Whether every password of at least `min_length` characters has `location`.
fn location_guaranteed(location: i64, min_length: usize) -> bool {
    let min_length = i64::try_from(min_length).unwrap_or(i64::MAX);
    if location >= 0 {
        min_length > location
    } else {
        min_length >= location.saturating_neg()
    }
}

/// Two charsets cannot both own the same literal position.
fn validate_shared_locations(reqs: &BTreeMap<String, CharsetRequirement>, path: &str) -> ValidationResult {
    let mut owners: BTreeMap<i64, &str> = BTreeMap::new();
    for (name, req) in reqs {
        for &location in &req.required_locations {
            if let Some(other) = owners.insert(location, name) {
                return Err(ConsistencyError::new(
                    format!("{path}.charset_requirements[{name}]"),
                    format!("location {location} is already required for '{other}'"),
                ));
            }
        }
    }
    Ok(())
}

/// `require`, the subset options and counting charset requirements must not
/// impose a presence obligation on the same charset twice.
fn validate_obligations(rule: &Rule, path: &str, table: &CharsetTable) -> ValidationResult {
    let required: BTreeSet<&str> = names_of(&rule.require).collect();
    let options: BTreeSet<&str> = match &rule.require_subset {
        Some(subset) => match &subset.options {
            Some(options) => options.iter().map(String::as_str).collect(),
            None => table.names().collect(),
        },
        None => BTreeSet::new(),
    };

    if let Some(name) = required.intersection(&options).next() {
        return Err(ConsistencyError::new(
            path,
            format!("charset '{name}' is in both require and require_subset options"),
        ));
    }

    if let Some(reqs) = &rule.charset_requirements {
        for (name, req) in reqs.iter().filter(|(_, req)| req.imposes_count()) {
            let source = if required.contains(name.as_str()) {
                "require"
            } else if options.contains(name.as_str()) {
                "require_subset options"
            } else {
                continue;
            };
            return Err(ConsistencyError::new(
                format!("{path}.charset_requirements[{name}]"),
                format!(
                    "charset is already counted by {source}; drop min_required and max_allowed = 0"
                ),
            ));
        }
    }
    Ok(())
}

fn names_of(names: &Option<BTreeSet<String>>) -> impl Iterator<Item = &str> {
    names.iter().flatten().map(String::as_str)
}

fn first_unknown<'a>(mut names: impl Iterator<Item = &'a str>, table: &CharsetTable) -> Option<&'a str> {
    names.find(|name| !table.contains(name))
}
