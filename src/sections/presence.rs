//! Presence section - required charsets and the subset requirement.

use crate::classify::ClassifiedPassword;
use crate::rule::Rule;

/// Every `require` charset must appear, and at least `count` of the subset
/// options must appear.
pub fn presence_section(password: &ClassifiedPassword<'_>, rule: &Rule) -> bool {
    let present = |name: &str| {
        password
            .class_of(name)
            .is_some_and(|class| password.contains(class))
    };

    if !rule.require.iter().flatten().all(|name| present(name.as_str())) {
        return false;
    }

    let Some(subset) = &rule.require_subset else {
        return true;
    };
    let satisfied = match &subset.options {
        Some(options) => options.iter().filter(|name| present(name.as_str())).count(),
        None => password.distinct_classes(),
    };
    satisfied >= subset.count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charsets::Preset;
    use crate::rule::SubsetRequirement;

    fn names(list: &[&str]) -> Option<std::collections::BTreeSet<String>> {
        Some(list.iter().map(|s| s.to_string()).collect())
    }

    fn subset(count: usize, options: Option<&[&str]>) -> Rule {
        Rule {
            require_subset: Some(SubsetRequirement {
                count,
                options: options.and_then(names),
            }),
            ..Rule::default()
        }
    }

    #[test]
    fn test_require_all_present() {
        let table = Preset::Default.table();
        let pwd = ClassifiedPassword::classify("Password1", &table).unwrap();
        let rule = Rule {
            require: names(&["upper", "digits"]),
            ..Rule::default()
        };
        assert!(presence_section(&pwd, &rule));
    }

    #[test]
    fn test_require_missing_charset() {
        let table = Preset::Default.table();
        let pwd = ClassifiedPassword::classify("abcd1234", &table).unwrap();
        let rule = Rule {
            require: names(&["upper", "digits"]),
            ..Rule::default()
        };
        assert!(!presence_section(&pwd, &rule));
    }

    #[test]
    fn test_subset_with_options() {
        let table = Preset::Default.table();
        let rule = subset(2, Some(&["lower", "upper", "digits"]));

        let mixed = ClassifiedPassword::classify("abcd1234", &table).unwrap();
        assert!(presence_section(&mixed, &rule));

        let lower = ClassifiedPassword::classify("abcdefgh", &table).unwrap();
        assert!(!presence_section(&lower, &rule));
    }

    #[test]
    fn test_subset_without_options_uses_whole_table() {
        let table = Preset::Default.table();
        let rule = subset(3, None);

        let three = ClassifiedPassword::classify("ab1!", &table).unwrap();
        assert!(presence_section(&three, &rule));

        let two = ClassifiedPassword::classify("ab12", &table).unwrap();
        assert!(!presence_section(&two, &rule));
    }
}
