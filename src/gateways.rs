use vozativa_core::gateways::verify::VerificationGateway;
use vozativa_gateways::{recaptcha::ReCaptcha, AlwaysHuman};

use crate::config;

pub fn verification_gateway(
    webserver: &config::WebServer,
) -> Box<dyn VerificationGateway + Send + Sync> {
    match &webserver.recaptcha_secret_key {
        Some(secret_key) if webserver.bot_check => {
            log::info!("Using the reCAPTCHA verification gateway");
            Box::new(ReCaptcha::new(secret_key.clone()))
        }
        _ => {
            log::info!("Bot check disabled: all verification tokens are accepted");
            Box::new(AlwaysHuman)
        }
    }
}
