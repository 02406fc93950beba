//! Password entry rules.

use thiserror::Error;

const MIN_STRONG_PASSWORD_LEN: usize = 8;

/// Errors raised by the password form before any secret store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordFormError {
    #[error("Password is required")]
    Required,

    #[error("The password should be at least 8 character containing a letter, a number and a special character")]
    TooWeak,

    #[error("Password confirmation is required")]
    ConfirmationRequired,

    #[error("Password Mismatch")]
    Mismatch,
}

/// Which checks the form applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordPolicy {
    /// Ask for the password twice.
    pub confirm_password: bool,
    /// Enforce the strength rule (used when a password is being set).
    pub should_validate: bool,
}

impl PasswordPolicy {
    /// Policy for unlocking an existing wallet.
    pub fn unlock() -> Self {
        Self::default()
    }

    /// Policy for choosing a new password.
    pub fn create() -> Self {
        Self {
            confirm_password: true,
            should_validate: true,
        }
    }
}

/// Raw values typed into the form.
#[derive(Clone, Default)]
pub struct PasswordEntry {
    pub password: String,
    pub password_confirm: Option<String>,
}

impl std::fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordEntry").finish_non_exhaustive()
    }
}

impl PasswordEntry {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            password_confirm: None,
        }
    }

    pub fn with_confirmation(mut self, confirm: impl Into<String>) -> Self {
        self.password_confirm = Some(confirm.into());
        self
    }
}

/// Run the form rules and hand back the accepted password.
pub fn validate_password_entry(entry: &PasswordEntry, policy: PasswordPolicy) -> Result<&str, PasswordFormError> {
    if entry.password.is_empty() {
        return Err(PasswordFormError::Required);
    }
    if policy.should_validate && !is_strong_password(&entry.password) {
        return Err(PasswordFormError::TooWeak);
    }
    if policy.confirm_password {
        match entry.password_confirm.as_deref() {
            None | Some("") => return Err(PasswordFormError::ConfirmationRequired),
            Some(confirm) if confirm != entry.password => return Err(PasswordFormError::Mismatch),
            Some(_) => {}
        }
    }
    Ok(&entry.password)
}

/// At least 8 characters with a letter, a digit and a special character.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_STRONG_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && c != '_' && !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let entry = PasswordEntry::new("");
        assert_eq!(validate_password_entry(&entry, PasswordPolicy::unlock()), Err(PasswordFormError::Required));
    }

    #[test]
    fn test_unlock_skips_strength_rule() {
        let entry = PasswordEntry::new("abc");
        assert_eq!(validate_password_entry(&entry, PasswordPolicy::unlock()), Ok("abc"));
    }

    #[test]
    fn test_strength_rule() {
        assert!(is_strong_password("passw0rd!"));
        assert!(!is_strong_password("password1"));
        assert!(!is_strong_password("p4ss_word"));
        assert!(!is_strong_password("p4s!"));
    }

    #[test]
    fn test_confirmation() {
        let policy = PasswordPolicy::create();
        let entry = PasswordEntry::new("passw0rd!");
        assert_eq!(validate_password_entry(&entry, policy), Err(PasswordFormError::ConfirmationRequired));

        let entry = PasswordEntry::new("passw0rd!").with_confirmation("passw0rd?");
        assert_eq!(validate_password_entry(&entry, policy), Err(PasswordFormError::Mismatch));

        let entry = PasswordEntry::new("passw0rd!").with_confirmation("passw0rd!");
        assert_eq!(validate_password_entry(&entry, policy), Ok("passw0rd!"));
    }

    #[test]
    fn test_debug_hides_password() {
        let entry = PasswordEntry::new("hunter2!");
        assert!(!format!("{:?}", entry).contains("hunter2"));
    }
}
