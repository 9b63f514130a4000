use super::*;

pub fn register_citizen(
    connections: &sqlite::Connections,
    new_citizen: usecases::NewCitizen,
) -> Result<User> {
    let db = connections.exclusive()?;
    let user = usecases::register_citizen(&db, new_citizen).map_err(|err| {
        info!("Rejected new citizen account: {err}");
        err
    })?;
    Ok(user)
}
