use super::prelude::*;
use crate::util::validate;

/// Editable part of a profile.
#[derive(Debug, Clone)]
pub struct ProfileChange {
    pub name: String,
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

pub fn update_profile<R: UserRepo>(repo: &R, user: User, change: ProfileChange) -> Result<User> {
    let ProfileChange {
        name,
        profession,
        bio,
        avatar_url,
    } = change;
    let Some(name) = validate::non_blank(&name) else {
        return Err(Error::UserName);
    };
    let updated = User {
        name: name.to_string(),
        profession: profession
            .as_deref()
            .and_then(validate::non_blank)
            .unwrap_or(DEFAULT_PROFESSION)
            .to_string(),
        bio: bio.as_deref().and_then(validate::non_blank).map(Into::into),
        avatar_url: avatar_url
            .as_deref()
            .and_then(validate::non_blank)
            .map(Into::into),
        ..user
    };
    repo.update_user(&updated)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use vozativa_entities::builders::*;

    #[test]
    fn update_name_and_clear_bio() {
        let db = MockDb::default();
        let mut user = User::build().finish();
        user.bio = Some("antiga".into());
        db.users.borrow_mut().push(user.clone());

        let change = ProfileChange {
            name: "Novo Nome".into(),
            profession: Some("Eletricista".into()),
            bio: Some("  ".into()),
            avatar_url: None,
        };
        let updated = update_profile(&db, user.clone(), change).unwrap();
        assert_eq!("Novo Nome", updated.name);
        assert_eq!("Eletricista", updated.profession);
        assert_eq!(None, updated.bio);
        assert_eq!(updated, db.get_user(user.id.as_str()).unwrap());
    }

    #[test]
    fn reject_blank_name() {
        let db = MockDb::default();
        let user = User::build().finish();
        db.users.borrow_mut().push(user.clone());
        let change = ProfileChange {
            name: String::new(),
            profession: None,
            bio: None,
            avatar_url: None,
        };
        assert!(matches!(
            update_profile(&db, user, change),
            Err(Error::UserName)
        ));
    }
}
