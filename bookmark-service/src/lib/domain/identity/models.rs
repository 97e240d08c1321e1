use std::fmt;

use serde::Deserialize;

use crate::domain::identity::errors::RegistrationError;

/// Accepted plaintext password lengths, in characters.
pub const PASSWORD_LENGTH_MIN: usize = 8;
pub const PASSWORD_LENGTH_MAX: usize = 500;

/// Identity record owned by the user store. Read-only to authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIdentity {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}

/// Login input, alive only for the duration of one login call.
#[derive(Clone, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Sign-up input. Holds the plaintext password until it is hashed.
#[derive(Clone)]
pub struct RegisterIdentityCommand {
    email: String,
    password: String,
}

impl RegisterIdentityCommand {
    /// Validate a sign-up request.
    ///
    /// # Errors
    /// * `InvalidEmail` - Email is blank or has no `@` between a local part and a domain
    /// * `InvalidPassword` - Password length outside the accepted range
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, RegistrationError> {
        let email = email.into().trim().to_string();
        let password = password.into();

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(RegistrationError::InvalidEmail(email)),
        }

        let length = password.chars().count();
        if !(PASSWORD_LENGTH_MIN..=PASSWORD_LENGTH_MAX).contains(&length) {
            return Err(RegistrationError::InvalidPassword {
                min: PASSWORD_LENGTH_MIN,
                max: PASSWORD_LENGTH_MAX,
            });
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for RegisterIdentityCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterIdentityCommand")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_hides_password() {
        let credential = Credential::new("drstrange@marvel.com", "82392342342");
        let printed = format!("{:?}", credential);
        assert!(printed.contains("drstrange@marvel.com"));
        assert!(!printed.contains("82392342342"));
    }

    #[test]
    fn test_register_command_valid() {
        let command = RegisterIdentityCommand::new(" drstrange@marvel.com ", "82392342342")
            .expect("Command should be valid");
        assert_eq!(command.email(), "drstrange@marvel.com");
        assert_eq!(command.password(), "82392342342");
        assert!(!format!("{:?}", command).contains("82392342342"));
    }

    #[test]
    fn test_register_command_invalid_email() {
        for email in ["", "drstrange", "@marvel.com", "drstrange@"] {
            assert!(matches!(
                RegisterIdentityCommand::new(email, "82392342342"),
                Err(RegistrationError::InvalidEmail(_))
            ));
        }
    }

    #[test]
    fn test_register_command_password_length() {
        assert!(matches!(
            RegisterIdentityCommand::new("drstrange@marvel.com", "1234567"),
            Err(RegistrationError::InvalidPassword { .. })
        ));
        assert!(matches!(
            RegisterIdentityCommand::new("drstrange@marvel.com", "x".repeat(501)),
            Err(RegistrationError::InvalidPassword { .. })
        ));
        assert!(RegisterIdentityCommand::new("drstrange@marvel.com", "12345678").is_ok());
    }
}
