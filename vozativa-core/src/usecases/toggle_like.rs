use super::prelude::*;

/// Adds the user to the likes of an item, or removes it again if it
/// is already present.
pub fn toggle_like<R: ItemRepo>(repo: &R, item_id: &Id, user_id: &Id) -> Result<LikeToggle> {
    let mut item = repo.get_item(item_id.as_str())?;
    let toggle = item.likes.toggle(user_id.clone());
    repo.update_item(&item)?;
    Ok(toggle)
}
