use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use vozativa_core::{
    entities::User,
    repositories::{self as repo, UserRepo},
};

use super::{from_diesel_err, Result};
use crate::{models, schema, DbReadOnly, DbReadWrite};

impl UserRepo for DbReadOnly<'_> {
    fn create_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }

    fn update_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }

    fn try_get_user(&self, id: &str) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), id)
    }

    fn get_user_by_email(&self, email: &str) -> Result<User> {
        get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn get_users(&self, ids: &[&str]) -> Result<Vec<User>> {
        get_users(&mut self.conn.borrow_mut(), ids)
    }

    fn count_users(&self) -> Result<u64> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl UserRepo for DbReadWrite<'_> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }

    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }

    fn try_get_user(&self, id: &str) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), id)
    }

    fn get_user_by_email(&self, email: &str) -> Result<User> {
        get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn get_users(&self, ids: &[&str]) -> Result<Vec<User>> {
        get_users(&mut self.conn.borrow_mut(), ids)
    }

    fn count_users(&self) -> Result<u64> {
        count_users(&mut self.conn.borrow_mut())
    }
}

fn create_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    let new_user = models::NewUser::from(user);
    diesel::insert_into(schema::users::table)
        .values(&new_user)
        .execute(conn)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                repo::Error::AlreadyExists
            }
            _ => from_diesel_err(err),
        })?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    use schema::users::dsl;
    let update_count = diesel::update(dsl::users.filter(dsl::uid.eq(user.id.as_str())))
        .set((
            dsl::email.eq(user.email.as_str()),
            dsl::password.eq(user.password.as_ref()),
            dsl::role.eq(user.role as i16),
            dsl::name.eq(&user.name),
            dsl::profession.eq(&user.profession),
            dsl::bio.eq(user.bio.as_deref()),
            dsl::avatar_url.eq(user.avatar_url.as_deref()),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if update_count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, id: &str) -> Result<User> {
    use schema::users::dsl;
    let entity = dsl::users
        .filter(dsl::uid.eq(id))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?;
    entity.try_into().map_err(repo::Error::Other)
}

fn try_get_user(conn: &mut SqliteConnection, id: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    let entity = dsl::users
        .filter(dsl::uid.eq(id))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?;
    let Some(entity) = entity else {
        return Ok(None);
    };
    Ok(Some(entity.try_into().map_err(repo::Error::Other)?))
}

fn get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<User> {
    try_get_user_by_email(conn, email)?.ok_or(repo::Error::NotFound)
}

fn try_get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    let entity = dsl::users
        .filter(dsl::email.eq(email))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?;
    let Some(entity) = entity else {
        return Ok(None);
    };
    Ok(Some(entity.try_into().map_err(repo::Error::Other)?))
}

fn get_users(conn: &mut SqliteConnection, ids: &[&str]) -> Result<Vec<User>> {
    use schema::users::dsl;
    let entities = dsl::users
        .filter(dsl::uid.eq_any(ids))
        .load::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?;
    entities
        .into_iter()
        .map(|entity| entity.try_into().map_err(repo::Error::Other))
        .collect()
}

fn count_users(conn: &mut SqliteConnection) -> Result<u64> {
    use schema::users::dsl;
    let count = dsl::users
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count as u64)
}
