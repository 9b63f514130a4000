use super::prelude::*;
use crate::util::validate;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub item_id: Id,
    pub text: String,
}

/// Appends a comment below an item.
pub fn add_comment<R>(repo: &R, author: &User, new_comment: NewComment) -> Result<Comment>
where
    R: ItemRepo + CommentRepo,
{
    let NewComment { item_id, text } = new_comment;
    let Some(text) = validate::non_blank(&text) else {
        return Err(Error::EmptyComment);
    };
    // Look up the item first so that commenting on an unknown id
    // fails with NotFound.
    let item = repo.get_item(item_id.as_str())?;
    let comment = Comment {
        id: Id::new(),
        item_id: item.id,
        author: author.id.clone(),
        text: text.to_string(),
        created_at: Timestamp::now(),
    };
    repo.add_comment(&comment)?;
    Ok(comment)
}
