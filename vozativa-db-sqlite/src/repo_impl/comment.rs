use diesel::prelude::*;

use vozativa_core::{
    entities::Comment,
    repositories::{self as repo, CommentRepo},
};

use super::{from_diesel_err, Result};
use crate::{models, schema, DbReadOnly, DbReadWrite};

impl CommentRepo for DbReadOnly<'_> {
    fn add_comment(&self, _comment: &Comment) -> Result<()> {
        unreachable!();
    }

    fn comments_of_item(&self, item_id: &str) -> Result<Vec<Comment>> {
        comments_of_item(&mut self.conn.borrow_mut(), item_id)
    }

    fn count_comments_of_item(&self, item_id: &str) -> Result<u64> {
        count_comments_of_item(&mut self.conn.borrow_mut(), item_id)
    }
}

impl CommentRepo for DbReadWrite<'_> {
    fn add_comment(&self, comment: &Comment) -> Result<()> {
        add_comment(&mut self.conn.borrow_mut(), comment)
    }

    fn comments_of_item(&self, item_id: &str) -> Result<Vec<Comment>> {
        comments_of_item(&mut self.conn.borrow_mut(), item_id)
    }

    fn count_comments_of_item(&self, item_id: &str) -> Result<u64> {
        count_comments_of_item(&mut self.conn.borrow_mut(), item_id)
    }
}

fn resolve_item_rowid(conn: &mut SqliteConnection, uid: &str) -> Result<i64> {
    use schema::items::dsl;
    dsl::items
        .select(dsl::id)
        .filter(dsl::uid.eq(uid))
        .first::<i64>(conn)
        .map_err(from_diesel_err)
}

fn add_comment(conn: &mut SqliteConnection, comment: &Comment) -> Result<()> {
    let item_rowid = resolve_item_rowid(conn, comment.item_id.as_str())?;
    let new_comment = models::NewComment {
        uid: comment.id.as_str(),
        item_rowid,
        author_uid: comment.author.as_str(),
        text: &comment.text,
        created_at: comment.created_at.as_secs(),
    };
    diesel::insert_into(schema::comments::table)
        .values(&new_comment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn comments_of_item(conn: &mut SqliteConnection, item_id: &str) -> Result<Vec<Comment>> {
    use schema::comments::dsl;
    let item_rowid = resolve_item_rowid(conn, item_id)?;
    let entities = dsl::comments
        .filter(dsl::item_rowid.eq(item_rowid))
        .order_by((dsl::created_at.asc(), dsl::id.asc()))
        .load::<models::CommentEntity>(conn)
        .map_err(from_diesel_err)?;
    Ok(entities
        .into_iter()
        .map(|entity| entity.into_comment(item_id.into()))
        .collect())
}

fn count_comments_of_item(conn: &mut SqliteConnection, item_id: &str) -> Result<u64> {
    use schema::comments::dsl;
    let item_rowid = resolve_item_rowid(conn, item_id)?;
    let count = dsl::comments
        .filter(dsl::item_rowid.eq(item_rowid))
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count as u64)
}
