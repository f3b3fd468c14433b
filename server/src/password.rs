use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use rand::rngs::OsRng;

use crate::error::DirectoryError;

/// Turns a submitted password into the value that gets persisted.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> Result<String, DirectoryError>;
}

/// Stores passwords exactly as submitted. Kept as the default so existing
/// records stay readable; switch to [`Argon2Encoder`] for anything real.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plaintext;

impl PasswordEncoder for Plaintext {
    fn encode(&self, raw: &str) -> Result<String, DirectoryError> {
        Ok(raw.to_owned())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Encoder;

impl PasswordEncoder for Argon2Encoder {
    fn encode(&self, raw: &str) -> Result<String, DirectoryError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|why| DirectoryError::Password(why.to_string()))
    }
}
