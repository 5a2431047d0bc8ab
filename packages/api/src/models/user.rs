use serde::Deserialize;

use crate::error::ApiError;

/// Body of `signUp` and `login`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    /// Reject obviously unusable credentials before touching the store.
    pub fn validate(&self) -> Result<(), ApiError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::ValidationFailed(
                "Invalid email address".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(ApiError::ValidationFailed(
                "Password is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate() {
        assert!(creds("me@example.com", "pw").validate().is_ok());
        assert!(creds("   ", "pw").validate().is_err());
        assert!(creds("not-an-email", "pw").validate().is_err());
        assert!(creds("me@example.com", "").validate().is_err());
    }
}
