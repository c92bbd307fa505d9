use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Relaxed minimum applied by the login form only.
pub const LOGIN_PASSWORD_MIN_LENGTH: usize = 6;
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email is required")]
    Required,
    #[error("Please enter a valid email address")]
    Invalid,
}

pub fn validate_email(email: &str) -> Result<(), EmailError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EmailError::Required);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(EmailError::Invalid);
    }
    Ok(())
}

/// Which password criteria are enforced. Symbols are opt-in.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub require_minimum_length: bool,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_numbers: bool,
    pub require_symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            require_minimum_length: true,
            require_uppercase: true,
            require_lowercase: true,
            require_numbers: true,
            require_symbols: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum PasswordViolation {
    #[error("Password is required")]
    Required,
    #[error("Password must be at least 8 characters")]
    TooShort,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Password must contain at least one number")]
    MissingNumber,
    #[error("Password must contain at least one special character")]
    MissingSymbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordCheck {
    pub valid: bool,
    pub violations: Vec<PasswordViolation>,
}

/// Checks `password` against the enabled criteria, one violation per failed
/// criterion. An empty password short-circuits to `Required` alone.
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> PasswordCheck {
    if password.is_empty() {
        return PasswordCheck {
            valid: false,
            violations: vec![PasswordViolation::Required],
        };
    }

    let mut violations = Vec::new();
    if policy.require_minimum_length && password.chars().count() < PASSWORD_MIN_LENGTH {
        violations.push(PasswordViolation::TooShort);
    }
    if policy.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordViolation::MissingUppercase);
    }
    if policy.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PasswordViolation::MissingLowercase);
    }
    if policy.require_numbers && !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordViolation::MissingNumber);
    }
    if policy.require_symbols && !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        violations.push(PasswordViolation::MissingSymbol);
    }

    PasswordCheck {
        valid: violations.is_empty(),
        violations,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfirmPasswordError {
    #[error("Please confirm your password")]
    Required,
    #[error("Passwords do not match")]
    Mismatch,
}

pub fn validate_confirm_password(
    password: &str,
    confirm_password: &str,
) -> Result<(), ConfirmPasswordError> {
    if confirm_password.is_empty() {
        return Err(ConfirmPasswordError::Required);
    }
    if password != confirm_password {
        return Err(ConfirmPasswordError::Mismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Full name is required")]
    Required,
    #[error("Name must be at least 2 characters")]
    TooShort,
    #[error("Name must be less than 50 characters")]
    TooLong,
}

pub fn validate_name(name: &str) -> Result<(), NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Required);
    }
    let len = trimmed.chars().count();
    if len < NAME_MIN_LENGTH {
        return Err(NameError::TooShort);
    }
    if len > NAME_MAX_LENGTH {
        return Err(NameError::TooLong);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthLabel::Weak => write!(f, "Weak"),
            StrengthLabel::Medium => write!(f, "Medium"),
            StrengthLabel::Strong => write!(f, "Strong"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// 0..=100, 20 points per satisfied criterion.
    pub score: u8,
    /// `None` only for empty input.
    pub label: Option<StrengthLabel>,
}

/// Scores a password over five criteria: minimum length, lowercase,
/// uppercase, digit, symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: None,
        };
    }

    let criteria = [
        password.chars().count() >= PASSWORD_MIN_LENGTH,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = criteria.iter().filter(|met| **met).count() as u8 * 20;
    let label = if score < 40 {
        StrengthLabel::Weak
    } else if score < 80 {
        StrengthLabel::Medium
    } else {
        StrengthLabel::Strong
    };

    PasswordStrength {
        score,
        label: Some(label),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

/// Per-field messages keyed by field; an empty map means the form is valid.
pub type FormErrors = BTreeMap<FormField, String>;

pub fn validate_login_form(email: &str, password: &str) -> FormErrors {
    let mut errors = FormErrors::new();

    if let Err(e) = validate_email(email) {
        errors.insert(FormField::Email, e.to_string());
    }

    // Login only checks presence and the relaxed minimum.
    if password.is_empty() {
        errors.insert(FormField::Password, PasswordViolation::Required.to_string());
    } else if password.chars().count() < LOGIN_PASSWORD_MIN_LENGTH {
        errors.insert(
            FormField::Password,
            format!("Password must be at least {LOGIN_PASSWORD_MIN_LENGTH} characters"),
        );
    }

    errors
}

pub fn validate_registration_form(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> FormErrors {
    let mut errors = FormErrors::new();

    if let Err(e) = validate_name(name) {
        errors.insert(FormField::Name, e.to_string());
    }
    if let Err(e) = validate_email(email) {
        errors.insert(FormField::Email, e.to_string());
    }

    let check = validate_password(password, &PasswordPolicy::default());
    if !check.valid {
        let message = check
            .violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        errors.insert(FormField::Password, message);
    }

    if let Err(e) = validate_confirm_password(password, confirm_password) {
        errors.insert(FormField::ConfirmPassword, e.to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rejects_empty_and_malformed() {
        assert_eq!(validate_email(""), Err(EmailError::Required));
        assert_eq!(validate_email("   "), Err(EmailError::Required));
        assert_eq!(validate_email("a@b"), Err(EmailError::Invalid));
        assert_eq!(validate_email("a b@c.com"), Err(EmailError::Invalid));
        assert_eq!(validate_email("a@b.com"), Ok(()));
        assert_eq!(validate_email("  a@b.com  "), Ok(()));
    }

    #[test]
    fn empty_password_short_circuits_to_required() {
        let check = validate_password("", &PasswordPolicy::default());
        assert!(!check.valid);
        assert_eq!(check.violations, vec![PasswordViolation::Required]);
    }

    #[test]
    fn password_reports_one_violation_per_failed_criterion() {
        let check = validate_password("abcdefgh", &PasswordPolicy::default());
        assert!(!check.valid);
        assert!(check.violations.contains(&PasswordViolation::MissingUppercase));
        assert!(check.violations.contains(&PasswordViolation::MissingNumber));
        assert!(!check.violations.contains(&PasswordViolation::TooShort));
        assert!(!check.violations.contains(&PasswordViolation::MissingLowercase));
    }

    #[test]
    fn password_meeting_default_policy_is_valid() {
        let check = validate_password("Abcdef12", &PasswordPolicy::default());
        assert!(check.valid);
        assert!(check.violations.is_empty());
    }

    #[test]
    fn symbols_only_checked_when_policy_asks() {
        let policy = PasswordPolicy {
            require_symbols: true,
            ..PasswordPolicy::default()
        };
        let check = validate_password("Abcdef12", &policy);
        assert_eq!(check.violations, vec![PasswordViolation::MissingSymbol]);
        assert!(validate_password("Abcdef1!", &policy).valid);
    }

    #[test]
    fn confirm_password_rules() {
        assert_eq!(
            validate_confirm_password("secret", ""),
            Err(ConfirmPasswordError::Required)
        );
        assert_eq!(
            validate_confirm_password("secret", "other"),
            Err(ConfirmPasswordError::Mismatch)
        );
        assert_eq!(validate_confirm_password("secret", "secret"), Ok(()));
    }

    #[test]
    fn name_length_bounds_are_applied_after_trim() {
        assert_eq!(validate_name("   "), Err(NameError::Required));
        assert_eq!(validate_name(" A "), Err(NameError::TooShort));
        assert_eq!(validate_name(&"x".repeat(51)), Err(NameError::TooLong));
        assert_eq!(validate_name("Jo"), Ok(()));
        assert_eq!(validate_name(&"x".repeat(50)), Ok(()));
    }

    #[test]
    fn strength_of_empty_password_has_no_label() {
        let strength = password_strength("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.label, None);
    }

    #[test]
    fn strength_scores_twenty_points_per_criterion() {
        // length + lower + upper + digit, no symbol
        let strength = password_strength("Abcdef12");
        assert_eq!(strength.score, 80);
        assert_eq!(strength.label, Some(StrengthLabel::Strong));

        let strength = password_strength("Abcdef1!");
        assert_eq!(strength.score, 100);
        assert_eq!(strength.label, Some(StrengthLabel::Strong));

        // lower only, too short
        let strength = password_strength("abc");
        assert_eq!(strength.score, 20);
        assert_eq!(strength.label, Some(StrengthLabel::Weak));

        // lower + digit
        let strength = password_strength("abc123");
        assert_eq!(strength.score, 40);
        assert_eq!(strength.label, Some(StrengthLabel::Medium));
    }

    #[test]
    fn login_form_uses_relaxed_password_minimum() {
        let errors = validate_login_form("a@b.com", "abc123");
        assert!(errors.is_empty());

        let errors = validate_login_form("a@b.com", "abc12");
        assert!(errors.contains_key(&FormField::Password));

        let errors = validate_login_form("", "");
        assert_eq!(
            errors.get(&FormField::Email).map(String::as_str),
            Some("Email is required")
        );
        assert!(errors.contains_key(&FormField::Password));
    }

    #[test]
    fn registration_form_aggregates_field_errors() {
        let errors = validate_registration_form("J", "nope", "abc", "abcd");
        assert!(errors.contains_key(&FormField::Name));
        assert!(errors.contains_key(&FormField::Email));
        assert!(errors.contains_key(&FormField::Password));
        assert!(errors.contains_key(&FormField::ConfirmPassword));

        let errors = validate_registration_form("Jane Doe", "a@b.com", "Abcdef12", "Abcdef12");
        assert!(errors.is_empty());
    }
}
