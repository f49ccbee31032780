//! Local form validation.
//!
//! Pure, synchronous checks that gate submission; nothing here touches the
//! network. Each function returns a map from field identifier to the message
//! shown under that field; an empty map means the form may submit. Screens
//! clear an entry the moment its field is edited again.

use std::collections::BTreeMap;

use crate::api::RegisterFields;

/// Field identifiers shared by the screens and the error maps.
pub mod fields {
    pub const USERNAME: &str = "username";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const TOS_ACCEPT: &str = "tosAccept";
    pub const PRIVACY_POLICY_ACCEPT: &str = "privacyPolicyAccept";
    pub const OTP: &str = "otp";
}

pub type ValidationErrors = BTreeMap<&'static str, String>;

const MIN_PASSWORD_LEN: usize = 10;

/// Checks the `non-space@non-space.non-space` email shape.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    // Some '@' with at least one character before it, followed by a '.'
    // with characters on both sides.
    email.char_indices().any(|(at, c)| {
        c == '@'
            && at > 0
            && email[at + 1..]
                .char_indices()
                .any(|(dot, d)| d == '.' && dot > 0 && at + 1 + dot + 1 < email.len())
    })
}

/// Validates the login form.
pub fn validate_login(email: &str, password: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if email.is_empty() {
        errors.insert(fields::EMAIL, "Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.insert(fields::EMAIL, "Invalid email format".to_string());
    }
    if password.is_empty() {
        errors.insert(fields::PASSWORD, "Password is required".to_string());
    }
    errors
}

/// Validates the signup form.
pub fn validate_signup(form: &RegisterFields, confirm_password: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.username.is_empty() {
        errors.insert(fields::USERNAME, "Username is required".to_string());
    }
    if form.first_name.is_empty() {
        errors.insert(fields::FIRST_NAME, "First Name is required".to_string());
    }
    if form.last_name.is_empty() {
        errors.insert(fields::LAST_NAME, "Last Name is required".to_string());
    }
    if form.email.is_empty() {
        errors.insert(fields::EMAIL, "Email is required".to_string());
    } else if !is_valid_email(&form.email) {
        errors.insert(fields::EMAIL, "Invalid email format".to_string());
    }
    if form.password.is_empty() {
        errors.insert(fields::PASSWORD, "Password is required".to_string());
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            fields::PASSWORD,
            "Password must be at least 10 characters".to_string(),
        );
    }
    if confirm_password.is_empty() {
        errors.insert(
            fields::CONFIRM_PASSWORD,
            "Confirm Password is required".to_string(),
        );
    } else if confirm_password != form.password {
        errors.insert(fields::CONFIRM_PASSWORD, "Passwords do not match".to_string());
    }
    if !form.tos_accept {
        errors.insert(
            fields::TOS_ACCEPT,
            "You must accept the Terms of Service".to_string(),
        );
    }
    if !form.privacy_policy_accept {
        errors.insert(
            fields::PRIVACY_POLICY_ACCEPT,
            "You must accept the Privacy Policy".to_string(),
        );
    }

    errors
}

/// Validates the OTP form.
pub fn validate_otp(otp: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if otp.is_empty() {
        errors.insert(fields::OTP, "Please enter OTP".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> RegisterFields {
        RegisterFields {
            username: "newuser".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@test.com".to_string(),
            password: "longenough123".to_string(),
            tos_accept: true,
            privacy_policy_accept: true,
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("user@test.com"));
        assert!(is_valid_email("a@b.c"));
        // The dot must come after the '@' with characters around it
        assert!(!is_valid_email("a.b@c"));
        assert!(!is_valid_email("@test.com"));
        assert!(!is_valid_email("user@test."));
        assert!(!is_valid_email("user test@test.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn valid_signup_passes() {
        assert!(validate_signup(&valid_signup(), "longenough123").is_empty());
    }

    #[test]
    fn mismatched_passwords_block_submission() {
        let errors = validate_signup(&valid_signup(), "different123");
        assert_eq!(
            errors.get(fields::CONFIRM_PASSWORD).map(String::as_str),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn short_password_is_rejected() {
        let mut form = valid_signup();
        form.password = "short".to_string();
        let errors = validate_signup(&form, "short");
        assert_eq!(
            errors.get(fields::PASSWORD).map(String::as_str),
            Some("Password must be at least 10 characters")
        );
    }

    #[test]
    fn unchecked_tos_produces_the_exact_message() {
        let mut form = valid_signup();
        form.tos_accept = false;
        let errors = validate_signup(&form, "longenough123");
        assert_eq!(
            errors.get(fields::TOS_ACCEPT).map(String::as_str),
            Some("You must accept the Terms of Service")
        );
    }

    #[test]
    fn unchecked_privacy_policy_is_flagged() {
        let mut form = valid_signup();
        form.privacy_policy_accept = false;
        let errors = validate_signup(&form, "longenough123");
        assert_eq!(
            errors.get(fields::PRIVACY_POLICY_ACCEPT).map(String::as_str),
            Some("You must accept the Privacy Policy")
        );
    }

    #[test]
    fn empty_signup_reports_every_required_field() {
        let errors = validate_signup(&RegisterFields::default(), "");
        for field in [
            fields::USERNAME,
            fields::FIRST_NAME,
            fields::LAST_NAME,
            fields::EMAIL,
            fields::PASSWORD,
            fields::CONFIRM_PASSWORD,
            fields::TOS_ACCEPT,
            fields::PRIVACY_POLICY_ACCEPT,
        ] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn login_requires_both_fields_and_a_valid_email() {
        let errors = validate_login("", "");
        assert_eq!(
            errors.get(fields::EMAIL).map(String::as_str),
            Some("Email is required")
        );
        assert_eq!(
            errors.get(fields::PASSWORD).map(String::as_str),
            Some("Password is required")
        );

        let errors = validate_login("not-an-email", "pw");
        assert_eq!(
            errors.get(fields::EMAIL).map(String::as_str),
            Some("Invalid email format")
        );

        assert!(validate_login("user@test.com", "pw").is_empty());
    }

    #[test]
    fn otp_must_be_present() {
        assert_eq!(
            validate_otp("").get(fields::OTP).map(String::as_str),
            Some("Please enter OTP")
        );
        assert!(validate_otp("123456").is_empty());
    }
}
