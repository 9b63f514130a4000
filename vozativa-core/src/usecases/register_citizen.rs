use super::prelude::*;
use crate::util::validate;

/// Form data of a new account.
#[derive(Debug, Clone)]
pub struct NewCitizen {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirmed_password: String,
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

pub fn register_citizen<R: UserRepo>(repo: &R, new_citizen: NewCitizen) -> Result<User> {
    let NewCitizen {
        name,
        email,
        password,
        confirmed_password,
        profession,
        bio,
        avatar_url,
    } = new_citizen;
    let Some(name) = validate::non_blank(&name) else {
        return Err(Error::UserName);
    };
    if !validate::is_valid_email(&email) {
        return Err(Error::Email);
    }
    let password = password.parse::<Password>()?;
    if !password.verify(&confirmed_password) {
        return Err(Error::PasswordMismatch);
    }
    let email = EmailAddress::new_unchecked(email);
    if repo.try_get_user_by_email(email.as_str())?.is_some() {
        return Err(Error::UserExists);
    }
    let profession = profession
        .as_deref()
        .and_then(validate::non_blank)
        .unwrap_or(DEFAULT_PROFESSION)
        .to_string();
    let new_user = User {
        id: Id::new(),
        email,
        password,
        role: Role::Citizen,
        name: name.to_string(),
        profession,
        bio: bio.as_deref().and_then(validate::non_blank).map(Into::into),
        avatar_url: avatar_url
            .as_deref()
            .and_then(validate::non_blank)
            .map(Into::into),
        created_at: Timestamp::now(),
    };
    log::debug!(
        "Creating new citizen account with e-mail '{}'",
        new_user.email
    );
    repo.create_user(&new_user)?;
    Ok(new_user)
}
