//! Password form rules used by the authentication gate.

pub mod password;

pub use password::{validate_password_entry, PasswordEntry, PasswordFormError, PasswordPolicy};
