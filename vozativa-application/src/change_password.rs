use super::*;

pub fn change_password(
    connections: &sqlite::Connections,
    user: User,
    change: usecases::PasswordChange,
) -> Result<()> {
    let db = connections.exclusive()?;
    let user_id = user.id.clone();
    usecases::change_password(&db, user, change).map_err(|err| {
        warn!("Unable to change password of user '{user_id}': {err}");
        err
    })?;
    Ok(())
}
