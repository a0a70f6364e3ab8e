//! Password policy.
//!
//! Each rule has its own stable message so clients can point at the exact
//! problem. Rules are checked in order and the first violation wins.

use crate::errors::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

const SPECIAL_CHARACTERS: &str = "-!@#$%^&*()_=+[]{};:',.<>?";

pub fn check_password_policy(password: &str) -> Result<(), AppError> {
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password.len()) {
        return Err(AppError::validation("INVALID_LENGTH"));
    }

    if password.chars().any(|c| matches!(c, ' ' | '\t' | '\n' | '\r')) {
        return Err(AppError::validation("SPACES_NOT_ALLOWED"));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::validation("DIGIT_REQUIRED"));
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AppError::validation("LOWERCASE_REQUIRED"));
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AppError::validation("UPPERCASE_REQUIRED"));
    }

    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(AppError::validation("SPECIAL_SYMBOL_REQUIRED"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(password: &str) -> String {
        check_password_policy(password).unwrap_err().to_string()
    }

    #[test]
    fn test_accepts_strong_password() {
        assert!(check_password_policy("Abcdef1!").is_ok());
        assert!(check_password_policy("x-Y_9zzzzz").is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(violation("Ab1!"), "INVALID_LENGTH");
        assert_eq!(violation(&format!("Ab1!{}", "a".repeat(125))), "INVALID_LENGTH");
        assert!(check_password_policy(&format!("Ab1!{}", "a".repeat(124))).is_ok());
    }

    #[test]
    fn test_each_rule_has_its_own_message() {
        assert_eq!(violation("Abc def1!"), "SPACES_NOT_ALLOWED");
        assert_eq!(violation("Abcdefg!"), "DIGIT_REQUIRED");
        assert_eq!(violation("ABCDEF1!"), "LOWERCASE_REQUIRED");
        assert_eq!(violation("abcdef1!"), "UPPERCASE_REQUIRED");
        assert_eq!(violation("Abcdef12"), "SPECIAL_SYMBOL_REQUIRED");
    }
}
