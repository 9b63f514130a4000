use crate::{id::Id, time::Timestamp};

/// A comment below a content item.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id         : Id,
    pub item_id    : Id,
    pub author     : Id,
    pub text       : String,
    pub created_at : Timestamp,
}
