#[macro_use]
extern crate log;

use vozativa_core::gateways::verify::VerificationGateway;
use vozativa_db_sqlite::Connections;

mod web;

pub use web::Cfg;

pub async fn run(
    connections: Connections,
    cfg: Cfg,
    verify_gw: Box<dyn VerificationGateway + Send + Sync>,
) {
    web::run(connections.into(), cfg, verify_gw).await;
}
