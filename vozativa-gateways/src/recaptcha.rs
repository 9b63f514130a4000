use std::net::IpAddr;

use anyhow::anyhow;
use serde::Deserialize;

use vozativa_core::gateways::verify::{VerificationError, VerificationGateway};

pub const DEFAULT_API_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Token verification backed by the reCAPTCHA "siteverify" endpoint.
///
/// The requests are blocking, callers running inside an async
/// runtime have to dispatch them to a worker thread.
#[derive(Debug, Clone)]
pub struct ReCaptcha {
    pub secret_key: String,
    pub api_url: String,
}

impl ReCaptcha {
    pub fn new(secret_key: String) -> Self {
        Self {
            secret_key,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl ReCaptcha {
    fn request_verification(
        &self,
        token: &str,
        client_ip: Option<IpAddr>,
    ) -> anyhow::Result<VerifyResponse> {
        let mut params = vec![
            ("secret", self.secret_key.clone()),
            ("response", token.to_string()),
        ];
        if let Some(ip) = client_ip {
            params.push(("remoteip", ip.to_string()));
        }
        let client = reqwest::blocking::Client::new();
        let response = client.post(&self.api_url).form(&params).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(anyhow!(
                "verification request failed with status {status}: {body}"
            ));
        }
        Ok(response.json()?)
    }
}

impl VerificationGateway for ReCaptcha {
    fn verify_token(&self, token: &str, client_ip: Option<IpAddr>) -> Result<(), VerificationError> {
        if token.trim().is_empty() {
            return Err(VerificationError::MissingToken);
        }
        let response = self
            .request_verification(token, client_ip)
            .map_err(VerificationError::Unavailable)?;
        if !response.success {
            log::debug!("Verification token rejected: {:?}", response.error_codes);
            return Err(VerificationError::Rejected);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_fails_without_a_request() {
        // An unreachable URL proves that no request is sent.
        let gateway = ReCaptcha {
            secret_key: "secret".into(),
            api_url: "http://127.0.0.1:1/unreachable".into(),
        };
        assert!(matches!(
            gateway.verify_token("   ", None),
            Err(VerificationError::MissingToken)
        ));
    }
}
