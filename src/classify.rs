//! Maps a password into the charset index space of a table.

use std::collections::BTreeSet;

use crate::charsets::CharsetTable;

/// A password together with the charset index of each of its characters.
pub struct ClassifiedPassword<'a> {
    raw: &'a str,
    chars: Vec<char>,
    classes: Vec<usize>,
    charsets: &'a CharsetTable,
}

impl<'a> ClassifiedPassword<'a> {
    /// Returns `None` when some character belongs to no charset.
    pub fn classify(raw: &'a str, charsets: &'a CharsetTable) -> Option<Self> {
        let classifier = charsets.classifier();
        let chars: Vec<char> = raw.chars().collect();
        let classes = chars
            .iter()
            .map(|c| classifier.get(c).copied())
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            raw,
            chars,
            classes,
            charsets,
        })
    }

    pub fn raw(&self) -> &str {
        self.raw
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn class_of(&self, name: &str) -> Option<usize> {
        self.charsets.index_of(name)
    }

    pub fn count(&self, class: usize) -> usize {
        self.classes.iter().filter(|&&c| c == class).count()
    }

    pub fn contains(&self, class: usize) -> bool {
        self.classes.contains(&class)
    }

    /// Number of different charsets the password draws from.
    pub fn distinct_classes(&self) -> usize {
        self.classes.iter().collect::<BTreeSet<_>>().len()
    }

    /// Longest run of adjacent characters of `class`.
    pub fn longest_run(&self, class: usize) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for &c in &self.classes {
            if c == class {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        longest
    }

    /// Class at `location`, where negative locations count from the end.
    ///
    /// `None` when the location falls outside the password.
    pub fn class_at(&self, location: i64) -> Option<usize> {
        let len = i64::try_from(self.len()).ok()?;
        let index = if location < 0 { len + location } else { location };
        let index = usize::try_from(index).ok()?;
        self.classes.get(index).copied()
    }
}
