use chrono::{DateTime, Utc};
use diesel::associations::HasTable;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::users;
use crate::schema::users::dsl::*;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub hash: String,
    pub gender: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub hash: String,
    pub gender: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

/// Partial profile update. `None` fields are left untouched.
#[derive(AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    pub username: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl UserCreate {
    pub fn save(self, connection: &DbConnection) -> Result<User> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(users)
            .values(&self)
            .returning(User::as_returning())
            .get_result(conn)?)
    }
}

impl User {
    pub fn fetch_by_id(target: i32, connection: &DbConnection) -> Result<Self> {
        let conn = &mut connection.pool.get()?;

        User::by_id(target)
            .select(User::as_select())
            .get_result(conn)
            .optional()?
            .ok_or(Error::UserNotFound)
    }

    pub fn fetch_by_email(target: &str, connection: &DbConnection) -> Result<Self> {
        let conn = &mut connection.pool.get()?;

        User::by_email(target)
            .select(User::as_select())
            .get_result(conn)
            .optional()?
            .ok_or(Error::UserNotFound)
    }

    /// Newest users first.
    pub fn fetch_page(skip: i64, limit: i64, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(User::table()
            .order(user_id.desc())
            .offset(skip)
            .limit(limit)
            .select(User::as_select())
            .load(conn)?)
    }

    pub fn update(target: i32, changes: &UserChanges, connection: &DbConnection) -> Result<Self> {
        let conn = &mut connection.pool.get()?;

        diesel::update(User::by_id(target))
            .set(changes)
            .returning(User::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::UserNotFound)
    }

    pub fn delete(target: i32, connection: &DbConnection) -> Result<()> {
        let conn = &mut connection.pool.get()?;

        let deleted = diesel::delete(User::by_id(target)).execute(conn)?;
        if deleted == 0 {
            return Err(Error::UserNotFound);
        }
        Ok(())
    }
}

impl User {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i32) -> _ {
        crate::schema::users::dsl::users.filter(user_id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_email(target: &str) -> _ {
        crate::schema::users::dsl::users.filter(email.eq(target))
    }
}
