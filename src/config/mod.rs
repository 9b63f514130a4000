use std::{
    env, fs,
    io::ErrorKind,
    path::Path,
};

use anyhow::{anyhow, Result};

use vozativa_core::entities::EmailAddress;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "vozativa.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub accounts: Accounts,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct WebServer {
    pub bot_check: bool,
    pub recaptcha_site_key: Option<String>,
    pub recaptcha_secret_key: Option<String>,
    pub login_max_attempts: u32,
    pub login_window: time::Duration,
}

pub struct Accounts {
    /// Accounts promoted to administrators at startup.
    pub admins: Vec<EmailAddress>,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            accounts,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer {
            bot_check,
            recaptcha_site_key,
            recaptcha_secret_key,
            login_max_attempts,
            login_window,
        } = webserver.unwrap_or_default();

        if bot_check && (recaptcha_site_key.is_none() || recaptcha_secret_key.is_none()) {
            return Err(anyhow!(
                "The bot check requires both reCAPTCHA keys to be configured"
            ));
        }
        if login_max_attempts == 0 {
            return Err(anyhow!("The login attempt limit must be greater than zero"));
        }
        let login_window = time::Duration::try_from(login_window)?;

        let webserver = WebServer {
            bot_check,
            recaptcha_site_key,
            recaptcha_secret_key,
            login_max_attempts,
            login_window,
        };

        let raw::Accounts { admins } = accounts.unwrap_or_default();
        let admins = admins
            .iter()
            .map(|address| address.parse::<EmailAddress>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| anyhow!("Invalid admin e-mail address"))?;
        let accounts = Accounts { admins };

        Ok(Self {
            db,
            webserver,
            accounts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let cfg: Config = Config::try_load_from_file_or_default(file).unwrap();
        assert!(!cfg.webserver.bot_check);
        assert!(cfg.accounts.admins.is_empty());
    }
}
