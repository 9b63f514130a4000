use super::prelude::*;

pub fn authorize_user_by_id<R: UserRepo>(
    repo: &R,
    user_id: &str,
    min_required_role: Role,
) -> Result<User> {
    let user = repo.try_get_user(user_id)?.ok_or(Error::Unauthorized)?;
    authorize_user(&user, min_required_role)?;
    Ok(user)
}

pub fn authorize_user(user: &User, min_required_role: Role) -> Result<()> {
    if user.role >= min_required_role {
        return Ok(());
    }
    Err(Error::Forbidden)
}
