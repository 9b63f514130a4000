use num_derive::{FromPrimitive, ToPrimitive};

use crate::{geo::MapPoint, id::Id, like::LikeSet, time::Timestamp};

/// A single entry published on the portal.
///
/// All three kinds share the common envelope and differ only in
/// their [`ItemDetails`]. The kind of an item is derived from its
/// details, so envelope and details can never disagree.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub id          : Id,
    pub author      : Id,
    pub title       : String,
    pub description : String,
    pub address     : String,
    pub location    : Option<MapPoint>,
    pub images      : Vec<String>,
    pub status      : ItemStatus,
    pub created_at  : Timestamp,
    pub likes       : LikeSet,
    pub details     : ItemDetails,
}

impl ContentItem {
    pub const fn kind(&self) -> ItemKind {
        self.details.kind()
    }
}

/// Kind-specific payload of a [`ContentItem`].
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDetails {
    /// Improvement request addressed to the municipality.
    Request {
        category: String,
    },
    /// Confidential report of an incident.
    Report {
        occurrence: String,
        video_url: Option<String>,
    },
    /// Listing of a local worker or business.
    Listing {
        category: String,
        custom_category: Option<String>,
        products: Option<String>,
        services: Option<String>,
        contact: String,
    },
}

impl ItemDetails {
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Request { .. } => ItemKind::Request,
            Self::Report { .. } => ItemKind::Report,
            Self::Listing { .. } => ItemKind::Listing,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum ItemKind {
    Request = 0,
    Report  = 1,
    Listing = 2,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum ItemStatus {
    Open        = 0,
    UnderReview = 1,
    Active      = 2,
    Resolved    = 3,
}

impl ItemStatus {
    /// The status a freshly submitted item starts with.
    pub const fn initial_for(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Request => Self::Open,
            ItemKind::Report => Self::UnderReview,
            ItemKind::Listing => Self::Active,
        }
    }
}
