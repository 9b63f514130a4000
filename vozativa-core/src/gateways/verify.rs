use std::net::IpAddr;

use thiserror::Error;

/// Checks that a request was made by a human.
///
/// Login and registration pass the token submitted with the form to
/// this gateway before any credentials are inspected.
pub trait VerificationGateway {
    fn verify_token(&self, token: &str, client_ip: Option<IpAddr>) -> Result<(), VerificationError>;
}

#[derive(Debug, Error)]
pub enum VerificationError {
    /// The form did not carry a token at all.
    #[error("no verification token submitted")]
    MissingToken,
    /// The verification service rejected the token.
    #[error("verification token rejected")]
    Rejected,
    /// The verification service could not be reached or answered
    /// with garbage.
    #[error("verification service unavailable")]
    Unavailable(#[source] anyhow::Error),
}
