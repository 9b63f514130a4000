use crate::repositories::*;

pub trait Db: UserRepo + ItemRepo + CommentRepo {}

impl<T> Db for T where T: UserRepo + ItemRepo + CommentRepo {}
