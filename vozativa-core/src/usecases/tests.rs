//! An in-memory database for use case tests.

use std::cell::RefCell;

use crate::{entities::*, repositories::*};

type RepoResult<T> = std::result::Result<T, Error>;

trait Key {
    fn key(&self) -> &str;
}

impl Key for User {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for ContentItem {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Comment {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Debug, Default)]
pub struct MockDb {
    pub users: RefCell<Vec<User>>,
    pub items: RefCell<Vec<ContentItem>>,
    pub comments: RefCell<Vec<Comment>>,
}

fn get<T: Clone + Key>(objects: &RefCell<Vec<T>>, key: &str) -> RepoResult<T> {
    objects
        .borrow()
        .iter()
        .find(|x| x.key() == key)
        .cloned()
        .ok_or(Error::NotFound)
}

fn create<T: Clone + Key>(objects: &RefCell<Vec<T>>, object: T) -> RepoResult<()> {
    if objects.borrow().iter().any(|x| x.key() == object.key()) {
        return Err(Error::AlreadyExists);
    }
    objects.borrow_mut().push(object);
    Ok(())
}

fn update<T: Clone + Key>(objects: &RefCell<Vec<T>>, object: &T) -> RepoResult<()> {
    let position = objects.borrow().iter().position(|x| x.key() == object.key());
    match position {
        Some(position) => {
            objects.borrow_mut()[position] = object.clone();
            Ok(())
        }
        None => Err(Error::NotFound),
    }
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        if self.users.borrow().iter().any(|u| u.email == user.email) {
            return Err(Error::AlreadyExists);
        }
        create(&self.users, user.clone())
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        update(&self.users, user)
    }

    fn get_user(&self, id: &str) -> RepoResult<User> {
        get(&self.users, id)
    }

    fn try_get_user(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.users.borrow().iter().find(|u| u.id.as_str() == id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> RepoResult<User> {
        self.try_get_user_by_email(email)?.ok_or(Error::NotFound)
    }

    fn try_get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    fn get_users(&self, ids: &[&str]) -> RepoResult<Vec<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .filter(|u| ids.contains(&u.id.as_str()))
            .cloned()
            .collect())
    }

    fn count_users(&self) -> RepoResult<u64> {
        Ok(self.users.borrow().len() as u64)
    }
}

impl ItemRepo for MockDb {
    fn create_item(&self, item: &ContentItem) -> RepoResult<()> {
        create(&self.items, item.clone())
    }

    fn update_item(&self, item: &ContentItem) -> RepoResult<()> {
        update(&self.items, item)
    }

    fn get_item(&self, id: &str) -> RepoResult<ContentItem> {
        get(&self.items, id)
    }

    fn all_items(&self, kind: ItemKind) -> RepoResult<Vec<ContentItem>> {
        let mut items: Vec<_> = self
            .items
            .borrow()
            .iter()
            .filter(|item| item.kind() == kind)
            .cloned()
            .collect();
        sort_newest_first(&mut items);
        Ok(items)
    }

    fn items_by_author(&self, author_id: &str) -> RepoResult<Vec<ContentItem>> {
        let mut items: Vec<_> = self
            .items
            .borrow()
            .iter()
            .filter(|item| item.author.as_str() == author_id)
            .cloned()
            .collect();
        sort_newest_first(&mut items);
        Ok(items)
    }

    fn count_items(&self, kind: ItemKind) -> RepoResult<u64> {
        Ok(self
            .items
            .borrow()
            .iter()
            .filter(|item| item.kind() == kind)
            .count() as u64)
    }
}

fn sort_newest_first(items: &mut [ContentItem]) {
    // Stable sort plus reverse: newest first, ties resolved by
    // insertion order with the most recently stored item first.
    items.sort_by_key(|item| item.created_at);
    items.reverse();
}

impl CommentRepo for MockDb {
    fn add_comment(&self, comment: &Comment) -> RepoResult<()> {
        create(&self.comments, comment.clone())
    }

    fn comments_of_item(&self, item_id: &str) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<_> = self
            .comments
            .borrow()
            .iter()
            .filter(|c| c.item_id.as_str() == item_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    fn count_comments_of_item(&self, item_id: &str) -> RepoResult<u64> {
        Ok(self
            .comments
            .borrow()
            .iter()
            .filter(|c| c.item_id.as_str() == item_id)
            .count() as u64)
    }
}
