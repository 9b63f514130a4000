//! Business rules of the Voz Ativa community portal.
//!
//! This crate defines the abstract repositories and gateways the
//! portal is built on together with all use cases that operate on
//! them. It contains no I/O.

pub mod db;
pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use vozativa_entities::{
        comment::*, email::*, geo::*, id::*, item::*, like::*, password::*, time::*, user::*,
    };
}
