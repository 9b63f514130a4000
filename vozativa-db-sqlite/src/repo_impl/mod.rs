//! Repository implementations for [`DbReadOnly`] and
//! [`DbReadWrite`](crate::DbReadWrite).
//!
//! Write operations on the read-only handle are unreachable by
//! construction, callers obtain it through
//! [`Connections::shared`](crate::Connections::shared).

use vozativa_core::repositories as repo;

mod comment;
mod item;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

fn from_diesel_err(err: diesel::result::Error) -> repo::Error {
    match err {
        diesel::result::Error::NotFound => repo::Error::NotFound,
        _ => repo::Error::Other(err.into()),
    }
}
