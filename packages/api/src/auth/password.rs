//! Argon2id credentials for sign-up and login.
//!
//! Hashing is deliberately slow, so both functions hop onto tokio's blocking
//! pool and can be awaited straight from a handler. The stored form is the
//! PHC string kept in `User::password_hash`.

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;
use tokio::task::{self, JoinError};

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(password_hash::Error),

    #[error("Stored password hash is unreadable: {0}")]
    MalformedHash(password_hash::Error),

    #[error("Password worker failed: {0}")]
    Worker(#[from] JoinError),
}

/// Salt and hash `password`, returning the PHC string to store.
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(PasswordError::Hash)
    })
    .await?
}

/// Check `password` against a stored PHC string.
///
/// A wrong password is `Ok(false)`; only an unreadable hash is an error.
pub async fn verify_password(password: String, stored: String) -> Result<bool, PasswordError> {
    task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored).map_err(PasswordError::MalformedHash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e)),
        }
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_verifies_original_password() {
        let hash = hash_password("correct horse".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("battery staple".to_string(), hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same".to_string()).await.unwrap();
        let b = hash_password("same".to_string()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_unreadable_hash_is_an_error() {
        let err = verify_password("anything".to_string(), "not-a-phc-string".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, PasswordError::MalformedHash(_)));
    }
}
