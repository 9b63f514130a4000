use super::prelude::*;

#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirmed_password: String,
}

/// Replaces the password of an account.
///
/// The current password must verify before anything is changed.
pub fn change_password<R: UserRepo>(repo: &R, user: User, change: PasswordChange) -> Result<()> {
    let PasswordChange {
        current_password,
        new_password,
        confirmed_password,
    } = change;
    if !user.password.verify(&current_password) {
        return Err(Error::Credentials);
    }
    if new_password != confirmed_password {
        return Err(Error::PasswordMismatch);
    }
    let password = new_password.parse::<Password>()?;
    let updated = User { password, ..user };
    repo.update_user(&updated)?;
    Ok(())
}
