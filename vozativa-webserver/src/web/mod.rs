use std::sync::Arc;

use rocket::{config::Config as RocketCfg, Rocket, Route};
use time::Duration;

use vozativa_core::gateways::verify::VerificationGateway;

mod frontend;
mod guards;
mod jwt;
mod sqlite;
mod throttle;


#[derive(Debug, Clone)]
pub struct Cfg {
    /// Require a verification token on login and registration.
    pub bot_check: bool,
    /// Site key rendered into the login and registration forms.
    pub recaptcha_site_key: Option<String>,
    pub login_max_attempts: u32,
    pub login_window: Duration,
}

impl Cfg {
    fn verification_site_key(&self) -> Option<&str> {
        if self.bot_check {
            self.recaptcha_site_key.as_deref()
        } else {
            None
        }
    }
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
    verify_gw: Box<dyn VerificationGateway + Send + Sync>,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
    } = options;

    let jwt_state = jwt::JwtState::new();
    let login_throttle = throttle::LoginThrottle::new(cfg.login_max_attempts, cfg.login_window);
    let verify_gw = guards::Verify(Arc::from(verify_gw));

    info!("Initialization finished");

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let mut instance = r
        .manage(db)
        .manage(jwt_state)
        .manage(login_throttle)
        .manage(verify_gw)
        .manage(cfg);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/", frontend::routes())]
}

pub async fn run(
    db: sqlite::Connections,
    cfg: Cfg,
    verify_gw: Box<dyn VerificationGateway + Send + Sync>,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
    };
    let instance = rocket_instance(options, db, verify_gw);
    if let Err(err) = instance.launch().await {
        error!("Unable to run web server: {err}");
    }
}
