use std::{fmt, str::FromStr};

use mailparse::addrparse;
use thiserror::Error;

/// A single, normalized e-mail address.
///
/// Addresses are compared case-insensitively by storing them
/// lowercased. Display names are not accepted, the portal only
/// ever deals with bare addresses submitted through forms.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Skips the validation of [`FromStr`].
    ///
    /// The given address is still normalized to lowercase.
    pub fn new_unchecked(address: String) -> Self {
        Self(address.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Error)]
#[error("invalid e-mail address")]
pub struct EmailAddressParseError;

impl FromStr for EmailAddress {
    type Err = EmailAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = addrparse(s).map_err(|_| EmailAddressParseError)?;
        let single = parsed
            .extract_single_info()
            .ok_or(EmailAddressParseError)?;
        if single.display_name.is_some() {
            return Err(EmailAddressParseError);
        }
        Ok(Self::new_unchecked(single.addr))
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
