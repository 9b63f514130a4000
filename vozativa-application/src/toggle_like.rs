use super::*;

/// The exclusive database handle makes the read-modify-write cycle
/// of the toggle atomic within this process.
pub fn toggle_like(
    connections: &sqlite::Connections,
    item_id: &Id,
    user_id: &Id,
) -> Result<LikeToggle> {
    let db = connections.exclusive()?;
    let toggle = usecases::toggle_like(&db, item_id, user_id).map_err(|err| {
        warn!("Unable to toggle like on item '{item_id}': {err}");
        err
    })?;
    Ok(toggle)
}
