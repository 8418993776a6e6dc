//! Input validation and sanitization, applied before any state mutation.

use crate::error::{Result, StoreError};

/// Trims whitespace and strips `<`/`>` from free-text input.
pub fn sanitize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect()
}

/// Minimal shape check: one `@` with non-empty, space-free local and domain
/// parts, and a dot in the domain.
pub fn validate_email(email: &str) -> Result<()> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(StoreError::InvalidEmail);
    };
    let ok = !local.is_empty()
        && !domain.is_empty()
        && !local.contains(char::is_whitespace)
        && !domain.contains(char::is_whitespace)
        && !domain.contains('@')
        && domain.split_once('.').is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty());
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidEmail)
    }
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.chars().count() < 2 {
        return Err(StoreError::InvalidName);
    }
    Ok(())
}

/// Password acceptance policy.
///
/// `Standard` is what registration enforces; `Strict` adds the special-char
/// and length-12 requirements for flows that opt in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPolicy {
    #[default]
    Standard,
    Strict,
}

impl PasswordPolicy {
    pub fn validate(&self, password: &str) -> Result<()> {
        if password.len() < 8 {
            return Err(StoreError::WeakPassword(
                "Password must be at least 8 characters long".into(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(StoreError::WeakPassword(
                "Password must contain at least one uppercase letter".into(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(StoreError::WeakPassword(
                "Password must contain at least one lowercase letter".into(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(StoreError::WeakPassword(
                "Password must contain at least one number".into(),
            ));
        }
        if *self == PasswordPolicy::Strict {
            if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
                return Err(StoreError::WeakPassword(
                    "Password must contain at least one special character".into(),
                ));
            }
            if password.len() < 12 {
                return Err(StoreError::WeakPassword(
                    "Password must be at least 12 characters long".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_angle_brackets_and_trims() {
        assert_eq!(sanitize("  <b>Alice</b>  "), "bAlice/b");
        assert_eq!(sanitize("plain"), "plain");
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("al ice@example.com").is_err());
        assert!(validate_email("alice@exa mple.com").is_err());
    }

    #[test]
    fn standard_policy() {
        assert!(PasswordPolicy::Standard.validate("Passw0rd").is_ok());
        assert!(PasswordPolicy::Standard.validate("short1A").is_err());
        assert!(PasswordPolicy::Standard.validate("alllower1").is_err());
        assert!(PasswordPolicy::Standard.validate("ALLUPPER1").is_err());
        assert!(PasswordPolicy::Standard.validate("NoDigitsHere").is_err());
    }

    #[test]
    fn strict_policy_adds_special_and_length() {
        assert!(PasswordPolicy::Strict.validate("Passw0rd").is_err());
        assert!(PasswordPolicy::Strict.validate("Passw0rd!").is_err()); // < 12
        assert!(PasswordPolicy::Strict.validate("LongPassw0rd!").is_ok());
    }

    #[test]
    fn name_length() {
        assert!(validate_name("Al").is_ok());
        assert!(validate_name("A").is_err());
    }
}
