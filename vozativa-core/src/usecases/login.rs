use super::prelude::*;

#[derive(Debug, Clone)]
pub struct Credentials<'a> {
    pub email: &'a EmailAddress,
    pub password: &'a str,
}

/// Checks the given credentials against the stored account.
///
/// An unknown e-mail address and a wrong password both fail with
/// [`Error::Credentials`] so that the response does not reveal
/// whether an account exists.
pub fn login_citizen<R: UserRepo>(repo: &R, login: &Credentials) -> Result<User> {
    repo.try_get_user_by_email(login.email.as_str())
        .map_err(Error::Repo)?
        .ok_or(Error::Credentials)
        .and_then(|user| {
            if user.password.verify(login.password) {
                Ok(user)
            } else {
                Err(Error::Credentials)
            }
        })
}
