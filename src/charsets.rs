//! Charset tables and the built-in presets.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::rule::Rule;

/// Name of the charset that replaces `lower` and `upper` in the alphabet preset.
pub const ALPHABET: &str = "alphabet";

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = " !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Named sets of characters a password is classified against.
///
/// Names iterate in sorted order and a charset's index is its position in
/// that order. Non-emptiness and disjointness are checked by
/// [`Policy::validate`](crate::Policy::validate), not on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharsetTable {
    sets: BTreeMap<String, BTreeSet<char>>,
}

impl CharsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to exactly the characters of `chars`, replacing any previous members.
    pub fn insert(&mut self, name: impl Into<String>, chars: &str) {
        self.sets.insert(name.into(), chars.chars().collect());
    }

    pub fn remove(&mut self, name: &str) -> Option<BTreeSet<char>> {
        self.sets.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<char>> {
        self.sets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<char>)> {
        self.sets.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Position of `name` in iteration order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.sets.keys().position(|k| k == name)
    }

    /// Builds the character → charset index lookup used for classification.
    ///
    /// On a table that failed validation a character shared by several
    /// charsets maps to the first of them.
    pub(crate) fn classifier(&self) -> HashMap<char, usize> {
        let mut map = HashMap::new();
        for (index, set) in self.sets.values().enumerate() {
            for &c in set {
                map.entry(c).or_insert(index);
            }
        }
        map
    }
}

impl<S: Into<String>, C: AsRef<str>> FromIterator<(S, C)> for CharsetTable {
    fn from_iter<I: IntoIterator<Item = (S, C)>>(iter: I) -> Self {
        let mut table = CharsetTable::new();
        for (name, chars) in iter {
            table.insert(name, chars.as_ref());
        }
        table
    }
}

/// The two built-in charset tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `lower`, `upper`, `digits`, `symbols`.
    Default,
    /// `alphabet`, `digits`, `symbols`.
    Alphabet,
}

impl Preset {
    pub fn table(self) -> CharsetTable {
        match self {
            Preset::Default => [
                ("lower", LOWER),
                ("upper", UPPER),
                ("digits", DIGITS),
                ("symbols", SYMBOLS),
            ]
            .into_iter()
            .collect(),
            Preset::Alphabet => {
                let mut table: CharsetTable =
                    [("digits", DIGITS), ("symbols", SYMBOLS)].into_iter().collect();
                table
                    .sets
                    .insert(ALPHABET.to_string(), LOWER.chars().chain(UPPER.chars()).collect());
                table
            }
        }
    }

    /// Picks the alphabet preset when any rule references the `alphabet` charset.
    pub fn infer<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Preset {
        if rules
            .into_iter()
            .any(|rule| rule.referenced_charsets().contains(ALPHABET))
        {
            Preset::Alphabet
        } else {
            Preset::Default
        }
    }
}
