use diesel::prelude::*;

use vozativa_core::{
    entities::{ContentItem, ItemKind, LikeSet},
    repositories::{self as repo, ItemRepo},
};

use super::{from_diesel_err, Result};
use crate::{models, schema, DbReadOnly, DbReadWrite};

impl ItemRepo for DbReadOnly<'_> {
    fn create_item(&self, _item: &ContentItem) -> Result<()> {
        unreachable!();
    }

    fn update_item(&self, _item: &ContentItem) -> Result<()> {
        unreachable!();
    }

    fn get_item(&self, id: &str) -> Result<ContentItem> {
        get_item(&mut self.conn.borrow_mut(), id)
    }

    fn all_items(&self, kind: ItemKind) -> Result<Vec<ContentItem>> {
        all_items(&mut self.conn.borrow_mut(), kind)
    }

    fn items_by_author(&self, author_id: &str) -> Result<Vec<ContentItem>> {
        items_by_author(&mut self.conn.borrow_mut(), author_id)
    }

    fn count_items(&self, kind: ItemKind) -> Result<u64> {
        count_items(&mut self.conn.borrow_mut(), kind)
    }
}

impl ItemRepo for DbReadWrite<'_> {
    fn create_item(&self, item: &ContentItem) -> Result<()> {
        create_item(&mut self.conn.borrow_mut(), item)
    }

    fn update_item(&self, item: &ContentItem) -> Result<()> {
        update_item(&mut self.conn.borrow_mut(), item)
    }

    fn get_item(&self, id: &str) -> Result<ContentItem> {
        get_item(&mut self.conn.borrow_mut(), id)
    }

    fn all_items(&self, kind: ItemKind) -> Result<Vec<ContentItem>> {
        all_items(&mut self.conn.borrow_mut(), kind)
    }

    fn items_by_author(&self, author_id: &str) -> Result<Vec<ContentItem>> {
        items_by_author(&mut self.conn.borrow_mut(), author_id)
    }

    fn count_items(&self, kind: ItemKind) -> Result<u64> {
        count_items(&mut self.conn.borrow_mut(), kind)
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

fn create_item(conn: &mut SqliteConnection, item: &ContentItem) -> Result<()> {
    let new_item = models::NewItem::from(item);
    diesel::insert_into(schema::items::table)
        .values(&new_item)
        .execute(conn)
        .map_err(from_diesel_err)?;
    let parent_rowid = resolve_item_rowid(conn, item.id.as_str())?;
    insert_images(conn, parent_rowid, &item.images)?;
    insert_likes(conn, parent_rowid, &item.likes)?;
    Ok(())
}

fn update_item(conn: &mut SqliteConnection, item: &ContentItem) -> Result<()> {
    let parent_rowid = resolve_item_rowid(conn, item.id.as_str())?;
    let new_item = models::NewItem::from(item);
    {
        use schema::items::dsl;
        diesel::update(dsl::items.filter(dsl::id.eq(parent_rowid)))
            .set((
                dsl::title.eq(new_item.title),
                dsl::description.eq(new_item.description),
                dsl::address.eq(new_item.address),
                dsl::lat.eq(new_item.lat),
                dsl::lng.eq(new_item.lng),
                dsl::status.eq(new_item.status),
                dsl::occurrence.eq(new_item.occurrence),
                dsl::video_url.eq(new_item.video_url),
                dsl::category.eq(new_item.category),
                dsl::custom_category.eq(new_item.custom_category),
                dsl::products.eq(new_item.products),
                dsl::services.eq(new_item.services),
                dsl::contact.eq(new_item.contact),
            ))
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    // Image and like rows are replaced wholesale.
    {
        use schema::item_image::dsl;
        diesel::delete(dsl::item_image.filter(dsl::parent_rowid.eq(parent_rowid)))
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    insert_images(conn, parent_rowid, &item.images)?;
    {
        use schema::item_like::dsl;
        diesel::delete(dsl::item_like.filter(dsl::parent_rowid.eq(parent_rowid)))
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    insert_likes(conn, parent_rowid, &item.likes)?;
    Ok(())
}

fn insert_images(conn: &mut SqliteConnection, parent_rowid: i64, images: &[String]) -> Result<()> {
    if images.is_empty() {
        return Ok(());
    }
    let rows: Vec<_> = images
        .iter()
        .enumerate()
        .map(|(position, url)| models::NewItemImage {
            parent_rowid,
            position: position as i16,
            url,
        })
        .collect();
    diesel::insert_into(schema::item_image::table)
        .values(&rows)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn insert_likes(conn: &mut SqliteConnection, parent_rowid: i64, likes: &LikeSet) -> Result<()> {
    if likes.is_empty() {
        return Ok(());
    }
    let rows: Vec<_> = likes
        .iter()
        .map(|user_id| models::NewItemLike {
            parent_rowid,
            user_uid: user_id.as_str(),
        })
        .collect();
    diesel::insert_into(schema::item_like::table)
        .values(&rows)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn load_images(conn: &mut SqliteConnection, parent_rowid: i64) -> Result<Vec<String>> {
    use schema::item_image::dsl;
    dsl::item_image
        .select(dsl::url)
        .filter(dsl::parent_rowid.eq(parent_rowid))
        .order_by(dsl::position.asc())
        .load::<String>(conn)
        .map_err(from_diesel_err)
}

fn load_likes(conn: &mut SqliteConnection, parent_rowid: i64) -> Result<Vec<String>> {
    use schema::item_like::dsl;
    dsl::item_like
        .select(dsl::user_uid)
        .filter(dsl::parent_rowid.eq(parent_rowid))
        .load::<String>(conn)
        .map_err(from_diesel_err)
}

fn load_content_item(
    conn: &mut SqliteConnection,
    entity: models::ItemEntity,
) -> Result<ContentItem> {
    let images = load_images(conn, entity.id)?;
    let liked_by = load_likes(conn, entity.id)?;
    entity
        .into_content_item(images, liked_by)
        .map_err(repo::Error::Other)
}

fn get_item(conn: &mut SqliteConnection, id: &str) -> Result<ContentItem> {
    use schema::items::dsl;
    let entity = dsl::items
        .filter(dsl::uid.eq(id))
        .first::<models::ItemEntity>(conn)
        .map_err(from_diesel_err)?;
    load_content_item(conn, entity)
}

fn all_items(conn: &mut SqliteConnection, kind: ItemKind) -> Result<Vec<ContentItem>> {
    use schema::items::dsl;
    let entities = dsl::items
        .filter(dsl::kind.eq(kind as i16))
        .order_by((dsl::created_at.desc(), dsl::id.desc()))
        .load::<models::ItemEntity>(conn)
        .map_err(from_diesel_err)?;
    entities
        .into_iter()
        .map(|entity| load_content_item(conn, entity))
        .collect()
}

fn items_by_author(conn: &mut SqliteConnection, author_id: &str) -> Result<Vec<ContentItem>> {
    use schema::items::dsl;
    let entities = dsl::items
        .filter(dsl::author_uid.eq(author_id))
        .order_by((dsl::created_at.desc(), dsl::id.desc()))
        .load::<models::ItemEntity>(conn)
        .map_err(from_diesel_err)?;
    entities
        .into_iter()
        .map(|entity| load_content_item(conn, entity))
        .collect()
}

fn count_items(conn: &mut SqliteConnection, kind: ItemKind) -> Result<u64> {
    use schema::items::dsl;
    let count = dsl::items
        .filter(dsl::kind.eq(kind as i16))
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count as u64)
}
