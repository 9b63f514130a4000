use super::*;

pub fn update_profile(
    connections: &sqlite::Connections,
    user: User,
    change: usecases::ProfileChange,
) -> Result<User> {
    let db = connections.exclusive()?;
    let updated = usecases::update_profile(&db, user, change).map_err(|err| {
        warn!("Unable to update profile: {err}");
        err
    })?;
    Ok(updated)
}
