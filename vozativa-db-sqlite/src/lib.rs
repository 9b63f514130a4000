//! SQLite persistence for the Voz Ativa community portal.
//!
//! A single process owns the database file. Readers share the
//! connection pool, writers take an exclusive lock on it so that
//! write operations are serialized.

#[macro_use]
extern crate diesel;

mod models;
mod repo_impl;
mod schema;

use std::{cell::RefCell, sync::Arc};

use anyhow::Result as Fallible;
use diesel::{
    connection::SimpleConnection as _,
    r2d2::{ConnectionManager, Pool, PooledConnection},
    sqlite::SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub const DATABASE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
type SharedSqlitePool = Arc<RwLock<SqlitePool>>;
type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub struct DbReadOnly<'a> {
    _lock: RwLockReadGuard<'a, SqlitePool>,
    conn: RefCell<SqlitePooledConnection>,
}

pub struct DbReadWrite<'a> {
    _lock: RwLockWriteGuard<'a, SqlitePool>,
    conn: RefCell<SqlitePooledConnection>,
}

#[derive(Clone)]
pub struct Connections {
    pool: SharedSqlitePool,
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        let manager = ConnectionManager::new(url);
        let pool = Pool::builder().max_size(pool_size).build(manager)?;
        // Fail early if the database is not usable and apply the
        // connection settings before anyone else grabs a connection.
        let mut conn = pool.get()?;
        initialize_connection(&mut conn)?;
        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly<'_>> {
        let lock = self.pool.read();
        let conn = lock.get()?;
        Ok(DbReadOnly {
            _lock: lock,
            conn: RefCell::new(conn),
        })
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite<'_>> {
        let lock = self.pool.write();
        let conn = lock.get()?;
        Ok(DbReadWrite {
            _lock: lock,
            conn: RefCell::new(conn),
        })
    }
}

fn initialize_connection(conn: &mut SqliteConnection) -> Fallible<()> {
    conn.batch_execute(
        "PRAGMA journal_mode = WAL;\
         PRAGMA synchronous = NORMAL;\
         PRAGMA busy_timeout = 5000;\
         PRAGMA foreign_keys = ON;",
    )?;
    Ok(())
}

pub fn run_embedded_database_migrations(connection: DbReadWrite<'_>) {
    log::info!("Running embedded database migrations");
    connection
        .conn
        .borrow_mut()
        .run_pending_migrations(DATABASE_MIGRATIONS)
        .unwrap();
}
