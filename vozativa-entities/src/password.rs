use std::str::FromStr;

use pwhash::bcrypt;
use thiserror::Error;

/// Minimum length of a password in cleartext.
pub const MIN_PASSWORD_LEN: usize = 4;

/// A salted bcrypt hash of a password.
///
/// The cleartext is dropped immediately after hashing and never
/// stored anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(String);

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("the password must contain at least {MIN_PASSWORD_LEN} characters")]
    TooShort,
    #[error(transparent)]
    Hash(#[from] pwhash::error::Error),
}

impl Password {
    /// Wraps an already hashed password, e.g. loaded from a database.
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn verify(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.0)
    }
}

impl FromStr for Password {
    type Err = ParseError;

    /// Hashes a cleartext password.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().len() < MIN_PASSWORD_LEN {
            return Err(ParseError::TooShort);
        }
        Ok(Self(bcrypt::hash(s)?))
    }
}

impl From<String> for Password {
    fn from(hash: String) -> Self {
        Self::from_hash(hash)
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
