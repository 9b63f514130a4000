use duration_str::deserialize_duration;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("vozativa.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
    pub accounts: Option<Accounts>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub bot_check: bool,
    pub recaptcha_site_key: Option<String>,
    pub recaptcha_secret_key: Option<String>,
    pub login_max_attempts: u32,
    #[serde(deserialize_with = "deserialize_duration")]
    pub login_window: Duration,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default()
            .webserver
            .expect("Webserver configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Accounts {
    #[serde(default)]
    pub admins: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(cfg.db.is_some());
        assert!(cfg.webserver.is_some());
    }

    #[test]
    fn default_webserver_config() {
        let cfg = WebServer::default();
        assert!(!cfg.bot_check);
        assert_eq!(5, cfg.login_max_attempts);
        assert_eq!(Duration::from_secs(15 * 60), cfg.login_window);
    }

    #[test]
    fn parse_config_with_admin_accounts() {
        let cfg: Config = toml::from_str(
            r#"
            [accounts]
            admins = ["prefeitura@example.com"]
            "#,
        )
        .unwrap();
        let accounts = cfg.accounts.unwrap();
        assert_eq!(vec!["prefeitura@example.com".to_string()], accounts.admins);
    }
}
