//! The checks a form runs before anything touches the network. The server
//! applies the same rules, so a payload that passes here can only be refused
//! for reasons the form cannot know about (like a duplicate email.)

use std::fmt::{self, Display, Formatter};

/// Passwords shorter than this are rejected everywhere.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Why a form was rejected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// At least one required field was blank.
    MissingFields,

    /// The password was present but too short.
    PasswordTooShort,
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => f.write_str("Please fill in all fields"),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            ),
        }
    }
}

/// Check a registration form.
///
/// ## Errors
///
/// Returns the first `Problem` found, checking for blank fields before
/// password length.
pub fn registration(full_name: &str, email: &str, password: &str) -> Result<(), Problem> {
    if full_name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(Problem::MissingFields);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Problem::PasswordTooShort);
    }

    Ok(())
}

/// Check a login form. The password length rule only applies when creating
/// an account; here any non-blank password is worth sending.
///
/// ## Errors
///
/// `Problem::MissingFields` if either field is blank.
pub fn login(username: &str, password: &str) -> Result<(), Problem> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(Problem::MissingFields);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn registration_rejects_a_blank_name() {
        assert_eq!(
            registration("", "ada@example.com", "longenough"),
            Err(Problem::MissingFields)
        );
    }

    #[test]
    fn registration_rejects_a_blank_email() {
        assert_eq!(
            registration("Ada Lovelace", "", "longenough"),
            Err(Problem::MissingFields)
        );
    }

    #[test]
    fn registration_rejects_a_blank_password() {
        assert_eq!(
            registration("Ada Lovelace", "ada@example.com", ""),
            Err(Problem::MissingFields)
        );
    }

    #[test]
    fn registration_treats_whitespace_as_blank() {
        assert_eq!(
            registration("   ", "ada@example.com", "longenough"),
            Err(Problem::MissingFields)
        );
    }

    #[test]
    fn registration_rejects_a_short_password() {
        assert_eq!(
            registration("Ada Lovelace", "ada@example.com", "2short"),
            Err(Problem::PasswordTooShort)
        );
    }

    #[test]
    fn registration_accepts_a_password_at_the_minimum() {
        assert_eq!(
            registration("Ada Lovelace", "ada@example.com", "12345678"),
            Ok(())
        );
    }

    #[test]
    fn problem_messages_read_as_sentences() {
        assert_eq!(
            Problem::MissingFields.to_string(),
            "Please fill in all fields"
        );
        assert_eq!(
            Problem::PasswordTooShort.to_string(),
            "Password must be at least 8 characters long"
        );
    }

    #[test]
    fn login_rejects_blank_fields() {
        assert_eq!(login("", "longenough"), Err(Problem::MissingFields));
        assert_eq!(login("ada@example.com", ""), Err(Problem::MissingFields));
    }

    #[test]
    fn login_accepts_any_password_length() {
        assert_eq!(login("ada@example.com", "x"), Ok(()));
    }

    proptest! {
        #[test]
        fn registration_never_accepts_short_passwords(password in ".{0,7}") {
            prop_assert!(registration("Ada Lovelace", "ada@example.com", &password).is_err());
        }

        #[test]
        fn registration_accepts_complete_forms(password in ".{8,64}") {
            prop_assert_eq!(registration("Ada Lovelace", "ada@example.com", &password), Ok(()));
        }
    }
}
