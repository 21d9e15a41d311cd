//! Password composition policy library
//!
//! This library parses, validates and enforces password composition
//! policies: declarative rules over named charsets that decide whether a
//! password is acceptable. It does not estimate password strength.
//!
//! # Features
//!
//! - `async` (default): Enables channel delivery of check results
//! - `tracing`: Enables logging via tracing crate
//!
//! # Example
//!
//! ```rust
//! use pwd_policy::{Policy, check_password};
//! use secrecy::SecretString;
//!
//! let policy = Policy::parse(r#"{"min_length": 8, "require": ["upper", "digits"]}"#)
//!     .expect("valid JSON");
//! policy.validate().expect("consistent policy");
//!
//! let password = SecretString::new("Password1".to_string().into());
//! assert!(check_password(&password, &policy).unwrap());
//!
//! // Round trip through the compact form
//! let text = policy.stringify();
//! assert_eq!(Policy::parse(&text).unwrap(), policy);
//! ```

// Internal modules
mod charsets;
mod checker;
mod classify;
mod error;
mod loader;
mod policy;
mod rule;
mod sections;
mod serialize;
mod validation;

// Public API
pub use charsets::{ALPHABET, CharsetTable, Preset};
pub use checker::check_password;
pub use error::{ConsistencyError, LoadError, ParseError};
pub use loader::load_policy_from_path;
pub use policy::Policy;
pub use rule::{CharsetRequirement, Rule, SubsetRequirement};

#[cfg(feature = "async")]
pub use checker::check_password_tx;
