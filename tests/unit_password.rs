use gatehouse_core::validation::check_password_policy;
use gatehouse_core::{ErrorCategory, ErrorKind, hash_password, verify_password};

#[test]
fn test_hash_is_salted() {
    let first = hash_password("Sam3!password").unwrap();
    let second = hash_password("Sam3!password").unwrap();

    assert_ne!(first, second);
    assert!(first.starts_with("$2"));
    assert!(verify_password("Sam3!password", &first).unwrap());
    assert!(verify_password("Sam3!password", &second).unwrap());
}

#[test]
fn test_verify_is_exact() {
    let hash = hash_password("Corr3ct!horse").unwrap();

    assert!(!verify_password("corr3ct!horse", &hash).unwrap());
    assert!(!verify_password("Corr3ct!horse ", &hash).unwrap());
    assert!(!verify_password("", &hash).unwrap());
}

#[test]
fn test_unicode_password() {
    let hash = hash_password("пароль密码🔒A1!").unwrap();
    assert!(verify_password("пароль密码🔒A1!", &hash).unwrap());
}

#[test]
fn test_corrupt_hash_is_internal() {
    let err = verify_password("whatever", "$2b$12$truncated").unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Internal);
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[test]
fn test_policy_rules_in_order() {
    let cases = [
        ("Aa1!", "INVALID_LENGTH"),
        ("Aa1! bcdef", "SPACES_NOT_ALLOWED"),
        ("Aa1!\tbcdef", "SPACES_NOT_ALLOWED"),
        ("Aa!bcdefg", "DIGIT_REQUIRED"),
        ("AA1!BCDEFG", "LOWERCASE_REQUIRED"),
        ("aa1!bcdefg", "UPPERCASE_REQUIRED"),
        ("Aa1bcdefgh", "SPECIAL_SYMBOL_REQUIRED"),
    ];

    for (password, expected) in cases {
        let err = check_password_policy(password).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure, "{password:?}");
        assert_eq!(err.to_string(), expected, "{password:?}");
    }
}

#[test]
fn test_policy_accepts_every_listed_symbol() {
    for symbol in "-!@#$%^&*()_=+[]{};:',.<>?".chars() {
        let password = format!("Abcdef1{symbol}");
        assert!(check_password_policy(&password).is_ok(), "{password:?}");
    }
}
