//! Domain entities of the Voz Ativa community portal.
//!
//! All types in this crate are plain data without any I/O
//! dependencies. Persistence and transport representations
//! live in other crates.

#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

pub mod comment;
pub mod email;
pub mod geo;
pub mod id;
pub mod item;
pub mod like;
pub mod password;
pub mod time;
pub mod user;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
