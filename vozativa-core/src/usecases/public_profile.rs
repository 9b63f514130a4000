use super::prelude::*;

/// Everything shown on the public profile page of a user.
///
/// Confidential reports are never part of a public profile, neither
/// as items nor in the received-like count.
#[derive(Debug, Clone)]
pub struct PublicProfile {
    pub user: User,
    pub items: Vec<ContentItem>,
    pub likes_received: usize,
}

pub fn public_profile<R>(repo: &R, user_id: &str) -> Result<PublicProfile>
where
    R: UserRepo + ItemRepo,
{
    let user = repo.get_user(user_id)?;
    let items: Vec<_> = repo
        .items_by_author(user_id)?
        .into_iter()
        .filter(|item| item.kind() != ItemKind::Report)
        .collect();
    let likes_received = items.iter().map(|item| item.likes.count()).sum();
    Ok(PublicProfile {
        user,
        items,
        likes_received,
    })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use vozativa_entities::builders::*;

    #[test]
    fn sum_likes_over_all_items() {
        let db = MockDb::default();
        let user = User::build().finish();
        db.users.borrow_mut().push(user.clone());
        db.items.borrow_mut().push(
            ContentItem::build()
                .author(user.id.as_str())
                .liked_by(vec!["a", "b"])
                .finish(),
        );
        db.items.borrow_mut().push(
            ContentItem::build()
                .author(user.id.as_str())
                .liked_by(vec!["c"])
                .finish(),
        );
        // Items of other authors do not count.
        db.items
            .borrow_mut()
            .push(ContentItem::build().liked_by(vec!["d"]).finish());

        let profile = public_profile(&db, user.id.as_str()).unwrap();
        assert_eq!(2, profile.items.len());
        assert_eq!(3, profile.likes_received);
    }

    #[test]
    fn hide_reports_of_the_user() {
        let db = MockDb::default();
        let user = User::build().finish();
        db.users.borrow_mut().push(user.clone());
        db.items.borrow_mut().push(
            ContentItem::build()
                .author(user.id.as_str())
                .details(ItemDetails::Report {
                    occurrence: "Descarte irregular de lixo".into(),
                    video_url: None,
                })
                .liked_by(vec!["a"])
                .finish(),
        );
        db.items.borrow_mut().push(
            ContentItem::build()
                .author(user.id.as_str())
                .liked_by(vec!["b", "c"])
                .finish(),
        );

        let profile = public_profile(&db, user.id.as_str()).unwrap();
        assert_eq!(1, profile.items.len());
        assert_ne!(ItemKind::Report, profile.items[0].kind());
        assert_eq!(2, profile.likes_received);
    }

    #[test]
    fn fail_for_unknown_user() {
        let db = MockDb::default();
        assert!(matches!(
            public_profile(&db, "desconhecido"),
            Err(Error::Repo(crate::repositories::Error::NotFound))
        ));
    }
}
