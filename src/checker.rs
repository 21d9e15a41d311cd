//! Password checker - decides whether a password satisfies a policy.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

use crate::classify::ClassifiedPassword;
use crate::error::ConsistencyError;
use crate::policy::Policy;
use crate::rule::Rule;
use crate::sections::{
    Section, charset_requirements_section, length_section, presence_section, repetition_section,
    substrings_section,
};

/// Checks a password against a policy.
///
/// The policy is validated first. The password passes when it satisfies any
/// rule; a character outside every charset fails it outright.
///
/// # Errors
/// Returns the policy's [`ConsistencyError`] if it fails validation.
pub fn check_password(password: &SecretString, policy: &Policy) -> Result<bool, ConsistencyError> {
    policy.validate()?;

    let Some(classified) = ClassifiedPassword::classify(password.expose_secret(), policy.charsets())
    else {
        #[cfg(feature = "tracing")]
        tracing::debug!("Password rejected: character outside every charset");
        return Ok(false);
    };

    for (_index, rule) in policy.rules().iter().enumerate() {
        if rule_satisfied(&classified, rule) {
            #[cfg(feature = "tracing")]
            tracing::debug!("Password accepted by rule {}", _index);
            return Ok(true);
        }
    }
    Ok(false)
}

fn rule_satisfied(password: &ClassifiedPassword<'_>, rule: &Rule) -> bool {
    // Orchestrator: every section must pass
    let sections: [(&str, Section); 5] = [
        ("length", length_section),
        ("repetition", repetition_section),
        ("substrings", substrings_section),
        ("presence", presence_section),
        ("charset_requirements", charset_requirements_section),
    ];

    for (_section_name, section_fn) in sections {
        if !section_fn(password, rule) {
            #[cfg(feature = "tracing")]
            tracing::trace!("Rule section failed: {}", _section_name);
            return false;
        }
    }
    true
}

/// Checks a password and sends the result via channel.
#[cfg(feature = "async")]
pub async fn check_password_tx(
    password: &SecretString,
    policy: &Policy,
    tx: mpsc::Sender<Result<bool, ConsistencyError>>,
) {
    let result = check_password(password, policy);

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password check result: {}", _e);
    }
}
