//! Abstract repositories for entity persistence.
//!
//! Implementations are provided by storage crates, e.g. backed by
//! SQLite. All reads return detached copies of the stored entities.

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait UserRepo {
    /// Fails with [`Error::AlreadyExists`] if the e-mail address is
    /// already taken.
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: &str) -> Result<User>;
    fn try_get_user(&self, id: &str) -> Result<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> Result<User>;
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_users(&self, ids: &[&str]) -> Result<Vec<User>>;
    fn count_users(&self) -> Result<u64>;
}

pub trait ItemRepo {
    fn create_item(&self, item: &ContentItem) -> Result<()>;
    /// Replaces the stored item, including its likes.
    /// Kind, author and creation time never change.
    fn update_item(&self, item: &ContentItem) -> Result<()>;

    fn get_item(&self, id: &str) -> Result<ContentItem>;
    /// All items of one kind, newest first.
    fn all_items(&self, kind: ItemKind) -> Result<Vec<ContentItem>>;
    /// All items written by the given user, newest first.
    fn items_by_author(&self, author_id: &str) -> Result<Vec<ContentItem>>;
    fn count_items(&self, kind: ItemKind) -> Result<u64>;
}

pub trait CommentRepo {
    fn add_comment(&self, comment: &Comment) -> Result<()>;
    /// All comments below an item, oldest first.
    fn comments_of_item(&self, item_id: &str) -> Result<Vec<Comment>>;
    fn count_comments_of_item(&self, item_id: &str) -> Result<u64>;
}
