//! Use cases of the portal, one module per operation.
//!
//! Each use case is a free function over the abstract repositories
//! defined in [`crate::repositories`].

mod add_comment;
mod authorize;
mod change_password;
mod error;
mod login;
mod public_profile;
mod register_citizen;
mod submit_item;
mod toggle_like;
mod update_profile;

#[cfg(test)]
pub mod tests;

pub use self::{
    add_comment::*, authorize::*, change_password::*, error::Error, login::*, public_profile::*,
    register_citizen::*, submit_item::*, toggle_like::*, update_profile::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}

use self::prelude::*;

pub fn load_hub<R: ItemRepo>(repo: &R, kind: ItemKind) -> Result<Vec<ContentItem>> {
    Ok(repo.all_items(kind)?)
}

pub fn load_item<R: ItemRepo>(repo: &R, id: &str) -> Result<ContentItem> {
    Ok(repo.get_item(id)?)
}

pub fn load_item_with_comments<R>(repo: &R, id: &str) -> Result<(ContentItem, Vec<Comment>)>
where
    R: ItemRepo + CommentRepo,
{
    let item = repo.get_item(id)?;
    let comments = repo.comments_of_item(id)?;
    Ok((item, comments))
}

/// An item as shown on its detail page, with author names resolved.
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub item: ContentItem,
    pub author: User,
    pub comments: Vec<(Comment, String)>,
}

pub fn load_item_page<R>(repo: &R, id: &str) -> Result<ItemPage>
where
    R: ItemRepo + CommentRepo + UserRepo,
{
    let (item, comments) = load_item_with_comments(repo, id)?;
    let author = repo.get_user(item.author.as_str())?;
    let comments = comments
        .into_iter()
        .map(|comment| {
            let name = repo.get_user(comment.author.as_str())?.name;
            Ok((comment, name))
        })
        .collect::<Result<_>>()?;
    Ok(ItemPage {
        item,
        author,
        comments,
    })
}
