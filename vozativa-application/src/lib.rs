//! Application flows of the portal.
//!
//! A flow acquires a database handle, runs one or more use cases on
//! it and logs rejected operations. Read-only page data is loaded
//! directly through the use cases, only mutations go through here.

#[macro_use]
extern crate log;

pub mod error;
pub mod prelude;

mod add_comment;
mod bootstrap_admins;
mod change_password;
mod register_citizen;
mod submit_item;
mod toggle_like;
mod update_profile;


pub(crate) use self::error::AppError;
pub(crate) type Result<T> = std::result::Result<T, AppError>;

pub(crate) use vozativa_core::{entities::*, repositories::*, usecases};

pub(crate) mod sqlite {
    pub use vozativa_db_sqlite::Connections;
}
