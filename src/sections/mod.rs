//! Rule evaluation sections
//!
//! Each section checks one aspect of a rule against a classified password.

mod charset;
mod length;
mod presence;
mod repetition;
mod substrings;

pub use charset::charset_requirements_section;
pub use length::length_section;
pub use presence::presence_section;
pub use repetition::repetition_section;
pub use substrings::substrings_section;

use crate::classify::ClassifiedPassword;
use crate::rule::Rule;

/// A section returns `true` when the password satisfies its part of the rule.
pub type Section = fn(&ClassifiedPassword<'_>, &Rule) -> bool;
