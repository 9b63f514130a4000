//! Fluent builders for tests.

pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{item_builder::*, user_builder::*};

pub mod user_builder {
    use super::Builder;
    use crate::{email::EmailAddress, id::Id, password::Password, time::Timestamp, user::*};

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub fn id(mut self, id: impl Into<Id>) -> Self {
            self.user.id = id.into();
            self
        }

        pub fn email(mut self, email: &str) -> Self {
            self.user.email = EmailAddress::new_unchecked(email.into());
            self
        }

        pub fn password(mut self, password: &str) -> Self {
            self.user.password = password.parse::<Password>().unwrap();
            self
        }

        pub fn role(mut self, role: Role) -> Self {
            self.user.role = role;
            self
        }

        pub fn name(mut self, name: &str) -> Self {
            self.user.name = name.into();
            self
        }

        pub fn finish(self) -> User {
            self.user
        }
    }

    impl Builder for User {
        type Build = UserBuild;
        fn build() -> Self::Build {
            UserBuild {
                user: User {
                    id: Id::new(),
                    email: EmailAddress::new_unchecked("citizen@example.com".into()),
                    // Does not verify against anything. Tests that log
                    // in must set a real password.
                    password: Password::from_hash(String::new()),
                    role: Role::Citizen,
                    name: "Cidadão de Teste".into(),
                    profession: DEFAULT_PROFESSION.into(),
                    bio: None,
                    avatar_url: None,
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}

pub mod item_builder {
    use super::Builder;
    use crate::{id::Id, item::*, like::LikeSet, time::Timestamp};

    #[derive(Debug)]
    pub struct ContentItemBuild {
        item: ContentItem,
    }

    impl ContentItemBuild {
        pub fn id(mut self, id: impl Into<Id>) -> Self {
            self.item.id = id.into();
            self
        }

        pub fn author(mut self, author: impl Into<Id>) -> Self {
            self.item.author = author.into();
            self
        }

        pub fn title(mut self, title: &str) -> Self {
            self.item.title = title.into();
            self
        }

        pub fn details(mut self, details: ItemDetails) -> Self {
            self.item.status = ItemStatus::initial_for(details.kind());
            self.item.details = details;
            self
        }

        pub fn status(mut self, status: ItemStatus) -> Self {
            self.item.status = status;
            self
        }

        pub fn created_at(mut self, at: Timestamp) -> Self {
            self.item.created_at = at;
            self
        }

        pub fn liked_by(mut self, user_ids: Vec<&str>) -> Self {
            self.item.likes = LikeSet::from_user_ids(user_ids.into_iter().map(Into::into).collect());
            self
        }

        pub fn finish(self) -> ContentItem {
            self.item
        }
    }

    impl Builder for ContentItem {
        type Build = ContentItemBuild;
        fn build() -> Self::Build {
            ContentItemBuild {
                item: ContentItem {
                    id: Id::new(),
                    author: Id::new(),
                    title: "Título de teste".into(),
                    description: "Descrição de teste".into(),
                    address: String::new(),
                    location: None,
                    images: vec![],
                    status: ItemStatus::initial_for(ItemKind::Request),
                    created_at: Timestamp::now(),
                    likes: LikeSet::new(),
                    details: ItemDetails::Request {
                        category: "Outros".into(),
                    },
                },
            }
        }
    }
}
