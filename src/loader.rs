//! Policy file loading
//!
//! Reads a JSON policy from disk and hands back a validated [`Policy`].

use std::path::Path;

use crate::error::LoadError;
use crate::policy::Policy;

/// Loads, parses and validates a policy file.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File is empty
/// - The content is not a policy document
/// - The policy is inconsistent
///
/// # Example
///
/// ```rust,ignore
/// let policy = pwd_policy::load_policy_from_path("/etc/myapp/password-policy.json")?;
/// ```
pub fn load_policy_from_path<P: AsRef<Path>>(path: P) -> Result<Policy, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Policy load FAILED: FileNotFound {:?}", path);
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Policy load FAILED: Empty file {:?}", path);
        return Err(LoadError::EmptyFile);
    }

    let policy = Policy::parse(&content)?;
    policy.validate()?;

    #[cfg(feature = "tracing")]
    tracing::info!("Policy loaded: {} rules from {:?}", policy.rules().len(), path);

    Ok(policy)
}
