//! Compact JSON form of a policy.
//!
//! Charsets are written as a diff against the preset the rules imply, so a
//! policy over an unmodified preset serializes to its rules alone.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::charsets::{CharsetTable, Preset};
use crate::error::ParseError;
use crate::policy::Policy;
use crate::rule::Rule;

/// Both accepted JSON shapes, normalized.
#[derive(Debug, Serialize)]
struct PolicyDocument {
    /// `None` deletes a preset charset, `Some` sets its members.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    charsets: BTreeMap<String, Option<String>>,
    rules: Vec<Rule>,
}

impl PolicyDocument {
    /// Accepts either a bare rule object or `{"rules": [...], "charsets"?: {...}}`.
    fn from_value(value: Value) -> Result<Self, ParseError> {
        let Value::Object(mut map) = value else {
            return Err(ParseError::shape("policy must be a JSON object"));
        };

        let charsets = match map.remove("charsets") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(diff) => serde_json::from_value(diff)?,
        };

        let rules = match map.remove("rules") {
            Some(rules @ Value::Array(_)) => {
                if let Some(key) = map.keys().next() {
                    return Err(ParseError::shape(format!(
                        "unexpected key '{key}' next to rules"
                    )));
                }
                serde_json::from_value::<Vec<Rule>>(rules)?
            }
            Some(_) => return Err(ParseError::shape("rules must be an array")),
            None => vec![serde_json::from_value::<Rule>(Value::Object(map))?],
        };

        Ok(Self { charsets, rules })
    }
}

/// Entries of `table` that differ from `baseline`.
fn charset_diff(baseline: &CharsetTable, table: &CharsetTable) -> BTreeMap<String, Option<String>> {
    let mut diff = BTreeMap::new();
    for name in baseline.names().filter(|name| !table.contains(name)) {
        diff.insert(name.to_string(), None);
    }
    for (name, set) in table.iter() {
        if baseline.get(name) != Some(set) {
            diff.insert(name.to_string(), Some(set.iter().collect()));
        }
    }
    diff
}

impl Policy {
    /// Parses a policy from its JSON text.
    ///
    /// The result is not validated; call [`Policy::validate`] before use.
    ///
    /// # Errors
    /// [`ParseError::Json`] for malformed JSON or mistyped fields,
    /// [`ParseError::Shape`] for a document that is not a policy.
    pub fn parse(text: &str) -> Result<Policy, ParseError> {
        let value: Value = serde_json::from_str(text)?;
        let document = PolicyDocument::from_value(value)?;

        let mut charsets = Preset::infer(&document.rules).table();
        for (name, chars) in document.charsets {
            match chars {
                Some(chars) => charsets.insert(name, &chars),
                None => {
                    charsets.remove(&name);
                }
            }
        }

        Ok(Policy::with_charsets(document.rules, charsets))
    }

    /// Serializes to the compact JSON form accepted by [`Policy::parse`].
    pub fn stringify(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let baseline = Preset::infer(self.rules()).table();

        let json = match self.rules() {
            [rule] if self.charsets() == &baseline => serde_json::to_string(rule),
            rules => serde_json::to_string(&PolicyDocument {
                charsets: charset_diff(&baseline, self.charsets()),
                rules: rules.to_vec(),
            }),
        }
        .map_err(|_| fmt::Error)?;

        f.write_str(&json)
    }
}

impl FromStr for Policy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_password;
    use crate::rule::{CharsetRequirement, SubsetRequirement};
    use proptest::prelude::*;
    use secrecy::SecretString;
    use std::collections::BTreeSet;

    fn rule(min_length: usize) -> Rule {
        Rule {
            min_length,
            ..Rule::default()
        }
    }

    #[test]
    fn test_stringify_single_rule_shorthand() {
        let policy = Policy::from(Rule {
            min_length: 8,
            require: Some(["digits".to_string(), "upper".to_string()].into()),
            ..Rule::default()
        });
        assert_eq!(
            policy.stringify(),
            r#"{"min_length":8,"require":["digits","upper"]}"#
        );
    }

    #[test]
    fn test_stringify_multiple_rules_without_charsets() {
        let policy = Policy::new(vec![rule(8), rule(16)]);
        assert_eq!(
            policy.stringify(),
            r#"{"rules":[{"min_length":8},{"min_length":16}]}"#
        );
    }

    #[test]
    fn test_stringify_charset_diff() {
        let mut table = Preset::Default.table();
        table.remove("symbols");
        table.insert("punct", "?!");
        table.insert("digits", "0123");
        let policy = Policy::with_charsets(vec![rule(8)], table);

        assert_eq!(
            policy.stringify(),
            r#"{"charsets":{"digits":"0123","punct":"!?","symbols":null},"rules":[{"min_length":8}]}"#
        );
    }

    #[test]
    fn test_stringify_diffs_against_inferred_preset() {
        // Alphabet table, but no rule mentions `alphabet`: parse would start
        // from the default preset, so the diff must be taken against it.
        let policy = Policy::with_charsets(vec![rule(4)], Preset::Alphabet.table());
        let text = policy.stringify();
        assert!(text.contains(r#""lower":null"#));
        assert!(text.contains(r#""upper":null"#));
        assert!(text.contains(r#""alphabet":""#));

        let parsed = Policy::parse(&text).unwrap();
        assert_eq!(parsed.charsets(), &Preset::Alphabet.table());
    }

    #[test]
    fn test_parse_bare_rule() {
        let policy = Policy::parse(r#"{"min_length": 12, "max_consecutive": 2}"#).unwrap();
        assert_eq!(policy.rules().len(), 1);
        assert_eq!(policy.rules()[0].min_length, 12);
        assert_eq!(policy.rules()[0].max_consecutive, Some(2));
        assert_eq!(policy.charsets(), &Preset::Default.table());
    }

    #[test]
    fn test_parse_defaults_min_length() {
        let policy = Policy::parse(r#"{"require": ["lower"]}"#).unwrap();
        assert_eq!(policy.rules()[0].min_length, 1);
    }

    #[test]
    fn test_parse_wrapped_rules_with_alphabet() {
        let text = r#"{
            "rules": [
                {"min_length": 8, "require": ["alphabet"]},
                {"min_length": 20}
            ]
        }"#;
        let policy: Policy = text.parse().unwrap();
        assert_eq!(policy.rules().len(), 2);
        assert_eq!(policy.charsets(), &Preset::Alphabet.table());
    }

    #[test]
    fn test_parse_applies_charset_diff() {
        let text = r#"{
            "charsets": {"symbols": null, "digits": "01", "hex": "abcdef"},
            "rules": [{"min_length": 4}]
        }"#;
        let policy = Policy::parse(text).unwrap();
        let charsets = policy.charsets();
        assert!(!charsets.contains("symbols"));
        assert_eq!(charsets.get("digits"), Some(&BTreeSet::from(['0', '1'])));
        assert_eq!(charsets.get("hex").map(|s| s.len()), Some(6));
        assert!(charsets.contains("lower"));
    }

    #[test]
    fn test_parse_empty_string_charset_is_kept_empty() {
        let policy = Policy::parse(r#"{"charsets": {"symbols": ""}, "rules": [{}]}"#).unwrap();
        assert_eq!(policy.charsets().get("symbols"), Some(&BTreeSet::new()));
        assert_eq!(policy.validate().unwrap_err().path, "charsets[symbols]");
    }

    #[test]
    fn test_parse_result_is_unvalidated() {
        let policy = Policy::parse(r#"{"min_length": 4, "max_length": 2}"#).unwrap();
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Policy::parse("{"), Err(ParseError::Json(_))));
        assert!(matches!(Policy::parse("[1, 2]"), Err(ParseError::Shape(_))));
        assert!(matches!(
            Policy::parse(r#"{"rules": {"min_length": 3}}"#),
            Err(ParseError::Shape(_))
        ));
        assert!(matches!(
            Policy::parse(r#"{"rules": [], "min_length": 3}"#),
            Err(ParseError::Shape(_))
        ));
        assert!(matches!(
            Policy::parse(r#"{"min_length": "eight"}"#),
            Err(ParseError::Json(_))
        ));
        assert!(matches!(
            Policy::parse(r#"{"min_length": 8, "strength": "high"}"#),
            Err(ParseError::Json(_))
        ));
        assert!(matches!(
            Policy::parse(r#"{"charsets": ["lower"], "rules": []}"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_round_trip_full_rule() {
        let mut reqs = std::collections::BTreeMap::new();
        reqs.insert(
            "digits".to_string(),
            CharsetRequirement {
                max_allowed: Some(4),
                max_consecutive: Some(2),
                required_locations: BTreeSet::from([-1]),
                prohibited_locations: BTreeSet::from([0]),
                ..CharsetRequirement::default()
            },
        );
        let original = Policy::new(vec![
            Rule {
                min_length: 10,
                max_length: Some(32),
                max_consecutive: Some(3),
                prohibited_substrings: Some(["admin".to_string()].into()),
                require: Some(["digits".to_string()].into()),
                require_subset: Some(SubsetRequirement {
                    count: 1,
                    options: Some(["lower".to_string(), "upper".to_string()].into()),
                }),
                charset_requirements: Some(reqs),
            },
            rule(24),
        ]);

        let parsed = Policy::parse(&original.stringify()).unwrap();
        assert_eq!(parsed, original);
    }

    fn arb_rule() -> impl Strategy<Value = Rule> {
        (
            1usize..6,
            proptest::option::of(0usize..6),
            proptest::option::of(1usize..4),
            proptest::option::of(prop::sample::subsequence(vec!["lower", "upper", "digits"], 1..3)),
        )
            .prop_map(|(min_length, extra, max_consecutive, require)| Rule {
                min_length,
                max_length: extra.map(|extra| min_length + extra),
                max_consecutive,
                require: require.map(|names| names.into_iter().map(String::from).collect()),
                ..Rule::default()
            })
    }

    proptest! {
        /// A reparsed preset policy accepts exactly the same passwords.
        #[test]
        fn round_trip_preserves_behaviour(
            rules in prop::collection::vec(arb_rule(), 1..3),
            password in "[a-zA-Z0-9!?]{0,10}",
        ) {
            let policy = Policy::new(rules);
            let reparsed = Policy::parse(&policy.stringify()).unwrap();
            let secret = SecretString::new(password.into());
            prop_assert_eq!(
                check_password(&secret, &policy).unwrap(),
                check_password(&secret, &reparsed).unwrap()
            );
        }
    }
}
