//! Gateway implementations for external services.

use std::net::IpAddr;

use vozativa_core::gateways::verify::{VerificationError, VerificationGateway};

pub mod recaptcha;

/// Accepts every token.
///
/// Used when no verification service is configured and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysHuman;

impl VerificationGateway for AlwaysHuman {
    fn verify_token(&self, _token: &str, _client_ip: Option<IpAddr>) -> Result<(), VerificationError> {
        Ok(())
    }
}
