use num_derive::{FromPrimitive, ToPrimitive};

use crate::{email::EmailAddress, id::Id, password::Password, time::Timestamp};

/// Profession shown for accounts that did not state one.
pub const DEFAULT_PROFESSION: &str = "Cidadão";

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id         : Id,
    pub email      : EmailAddress,
    pub password   : Password,
    pub role       : Role,
    pub name       : String,
    pub profession : String,
    pub bio        : Option<String>,
    pub avatar_url : Option<String>,
    pub created_at : Timestamp,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Role {
    Citizen = 0,
    Admin   = 1,
}

impl Default for Role {
    fn default() -> Role {
        Role::Citizen
    }
}
