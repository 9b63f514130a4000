use std::collections::HashSet;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{
    decode, encode, errors::Error, errors::ErrorKind, DecodingKey, EncodingKey, Header,
    TokenData, Validation,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

pub const TOKEN_VALIDITY: Duration = Duration::days(1);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The id of the authenticated user.
    sub: String,
    /// Expiration date as Unix timestamp.
    exp: i64,
}

/// Issues and validates the signed session tokens.
///
/// The signing secret is generated at startup, so all tokens expire
/// when the server restarts. Tokens of logged out users are kept on
/// a blacklist until they expire on their own.
pub struct JwtState {
    secret: String,
    blacklist: Mutex<HashSet<String>>,
}

impl JwtState {
    pub fn new() -> Self {
        Self {
            secret: STANDARD.encode(rand::random::<[u8; 32]>()),
            blacklist: Mutex::new(HashSet::new()),
        }
    }

    pub fn generate_token(&self, user_id: &str) -> Result<String, Error> {
        let exp = (OffsetDateTime::now_utc() + TOKEN_VALIDITY).unix_timestamp();
        let claims = Claims {
            sub: user_id.to_owned(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn validate_token_and_get_user_id(&self, token: &str) -> Result<String, Error> {
        if self.blacklist.lock().contains(token) {
            return Err(ErrorKind::InvalidToken.into());
        }
        let data = self.decode_token(token)?;
        Ok(data.claims.sub)
    }

    pub fn blacklist_token(&self, token: String) {
        let mut blacklist = self.blacklist.lock();
        // Tokens that expired on their own no longer need to be
        // tracked.
        blacklist.retain(|old| self.decode_token(old).is_ok());
        blacklist.insert(token);
    }

    fn decode_token(&self, token: &str) -> Result<TokenData<Claims>, Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
    }
}
