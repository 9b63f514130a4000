use anyhow::{anyhow, bail};
use num_traits::FromPrimitive as _;

use vozativa_entities::{
    comment::Comment,
    geo::MapPoint,
    id::Id,
    item::{ContentItem, ItemDetails, ItemKind, ItemStatus},
    like::LikeSet,
    time::Timestamp,
    user::{Role, User},
};

use crate::schema::*;

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub uid: &'a str,
    pub email: &'a str,
    pub password: String,
    pub role: i16,
    pub name: &'a str,
    pub profession: &'a str,
    pub bio: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub created_at: i64,
}

impl<'a> From<&'a User> for NewUser<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            uid: user.id.as_str(),
            email: user.email.as_str(),
            password: user.password.as_ref().to_string(),
            role: user.role as i16,
            name: &user.name,
            profession: &user.profession,
            bio: user.bio.as_deref(),
            avatar_url: user.avatar_url.as_deref(),
            created_at: user.created_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: i64,
    pub uid: String,
    pub email: String,
    pub password: String,
    pub role: i16,
    pub name: String,
    pub profession: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: i64,
}

impl TryFrom<UserEntity> for User {
    type Error = anyhow::Error;

    fn try_from(entity: UserEntity) -> Result<Self, Self::Error> {
        let UserEntity {
            id: _,
            uid,
            email,
            password,
            role,
            name,
            profession,
            bio,
            avatar_url,
            created_at,
        } = entity;
        let role = Role::from_i16(role).ok_or_else(|| anyhow!("invalid role: {role}"))?;
        Ok(User {
            id: uid.into(),
            email: vozativa_entities::email::EmailAddress::new_unchecked(email),
            password: password.into(),
            role,
            name,
            profession,
            bio,
            avatar_url,
            created_at: Timestamp::from_secs(created_at),
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = items)]
pub struct NewItem<'a> {
    pub uid: &'a str,
    pub kind: i16,
    pub author_uid: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub address: &'a str,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub status: i16,
    pub created_at: i64,
    pub occurrence: Option<&'a str>,
    pub video_url: Option<&'a str>,
    pub category: Option<&'a str>,
    pub custom_category: Option<&'a str>,
    pub products: Option<&'a str>,
    pub services: Option<&'a str>,
    pub contact: Option<&'a str>,
}

impl<'a> From<&'a ContentItem> for NewItem<'a> {
    fn from(item: &'a ContentItem) -> Self {
        let mut new_item = Self {
            uid: item.id.as_str(),
            kind: item.kind() as i16,
            author_uid: item.author.as_str(),
            title: &item.title,
            description: &item.description,
            address: &item.address,
            lat: item.location.map(|pos| pos.lat_deg()),
            lng: item.location.map(|pos| pos.lng_deg()),
            status: item.status as i16,
            created_at: item.created_at.as_secs(),
            occurrence: None,
            video_url: None,
            category: None,
            custom_category: None,
            products: None,
            services: None,
            contact: None,
        };
        match &item.details {
            ItemDetails::Request { category } => {
                new_item.category = Some(category);
            }
            ItemDetails::Report {
                occurrence,
                video_url,
            } => {
                new_item.occurrence = Some(occurrence);
                new_item.video_url = video_url.as_deref();
            }
            ItemDetails::Listing {
                category,
                custom_category,
                products,
                services,
                contact,
            } => {
                new_item.category = Some(category);
                new_item.custom_category = custom_category.as_deref();
                new_item.products = products.as_deref();
                new_item.services = services.as_deref();
                new_item.contact = Some(contact);
            }
        }
        new_item
    }
}

#[derive(Queryable)]
pub struct ItemEntity {
    pub id: i64,
    pub uid: String,
    pub kind: i16,
    pub author_uid: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub status: i16,
    pub created_at: i64,
    pub occurrence: Option<String>,
    pub video_url: Option<String>,
    pub category: Option<String>,
    pub custom_category: Option<String>,
    pub products: Option<String>,
    pub services: Option<String>,
    pub contact: Option<String>,
}

impl ItemEntity {
    /// Recombines an item row with its image and like rows.
    ///
    /// Fails if the row does not carry the columns its kind
    /// requires, which would mean the database is corrupt.
    pub fn into_content_item(
        self,
        images: Vec<String>,
        liked_by: Vec<String>,
    ) -> anyhow::Result<ContentItem> {
        let uid = self.uid;
        let kind = ItemKind::from_i16(self.kind)
            .ok_or_else(|| anyhow!("item '{uid}': invalid kind: {}", self.kind))?;
        let details = match kind {
            ItemKind::Request => ItemDetails::Request {
                category: self
                    .category
                    .ok_or_else(|| anyhow!("item '{uid}': missing category"))?,
            },
            ItemKind::Report => ItemDetails::Report {
                occurrence: self
                    .occurrence
                    .ok_or_else(|| anyhow!("item '{uid}': missing occurrence"))?,
                video_url: self.video_url,
            },
            ItemKind::Listing => ItemDetails::Listing {
                category: self
                    .category
                    .ok_or_else(|| anyhow!("item '{uid}': missing category"))?,
                custom_category: self.custom_category,
                products: self.products,
                services: self.services,
                contact: self
                    .contact
                    .ok_or_else(|| anyhow!("item '{uid}': missing contact"))?,
            },
        };
        let status = ItemStatus::from_i16(self.status)
            .ok_or_else(|| anyhow!("item '{uid}': invalid status: {}", self.status))?;
        let location = match (self.lat, self.lng) {
            (None, None) => None,
            (Some(lat), Some(lng)) => Some(
                MapPoint::try_from_lat_lng_deg(lat, lng)
                    .ok_or_else(|| anyhow!("item '{uid}': position out of range"))?,
            ),
            _ => bail!("item '{uid}': incomplete position"),
        };
        Ok(ContentItem {
            id: uid.into(),
            author: self.author_uid.into(),
            title: self.title,
            description: self.description,
            address: self.address,
            location,
            images,
            status,
            created_at: Timestamp::from_secs(self.created_at),
            likes: LikeSet::from_user_ids(liked_by.into_iter().map(Into::into).collect()),
            details,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = item_image)]
pub struct NewItemImage<'a> {
    pub parent_rowid: i64,
    pub position: i16,
    pub url: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = item_like)]
pub struct NewItemLike<'a> {
    pub parent_rowid: i64,
    pub user_uid: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment<'a> {
    pub uid: &'a str,
    pub item_rowid: i64,
    pub author_uid: &'a str,
    pub text: &'a str,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct CommentEntity {
    pub id: i64,
    pub uid: String,
    pub item_rowid: i64,
    pub author_uid: String,
    pub text: String,
    pub created_at: i64,
}

impl CommentEntity {
    pub fn into_comment(self, item_id: Id) -> Comment {
        Comment {
            id: self.uid.into(),
            item_id,
            author: self.author_uid.into(),
            text: self.text,
            created_at: Timestamp::from_secs(self.created_at),
        }
    }
}
