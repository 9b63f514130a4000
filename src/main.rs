#[macro_use]
extern crate log;

use std::{path::PathBuf, process::exit};

use anyhow::Result;
use clap::Parser;

mod config;
mod gateways;

use config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Portal de participação cidadã Voz Ativa")]
struct Args {
    /// Path of the configuration file.
    #[arg(long, value_name = "FILE")]
    cfg_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!("{err}");
        exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::try_load_from_file_or_default(args.cfg_file)?;

    let connections = vozativa_db_sqlite::Connections::init(
        &config.db.conn_sqlite,
        config.db.conn_pool_size.into(),
    )?;
    vozativa_db_sqlite::run_embedded_database_migrations(connections.exclusive()?);

    vozativa_application::prelude::bootstrap_admins(&connections, &config.accounts.admins)?;

    let verify_gw = gateways::verification_gateway(&config.webserver);

    let cfg = vozativa_webserver::Cfg {
        bot_check: config.webserver.bot_check,
        recaptcha_site_key: config.webserver.recaptcha_site_key.clone(),
        login_max_attempts: config.webserver.login_max_attempts,
        login_window: config.webserver.login_window,
    };
    vozativa_webserver::run(connections, cfg, verify_gw).await;
    Ok(())
}
