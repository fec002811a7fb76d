//! Uploaded image records. The binary itself lives in object storage; only
//! the retrievable URL is kept here.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::user_images;
use crate::schema::user_images::dsl::*;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::user_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserImage {
    pub id: Uuid,
    pub user_id: i32,
    pub file_name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_images)]
pub struct UserImageCreate {
    pub user_id: i32,
    pub file_name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageApi {
    pub id: Uuid,
    pub file_name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserImage> for ImageApi {
    fn from(value: UserImage) -> Self {
        Self {
            id: value.id,
            file_name: value.file_name,
            url: value.url,
            created_at: value.created_at,
        }
    }
}

impl UserImageCreate {
    pub fn save(self, connection: &DbConnection) -> Result<UserImage> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(user_images)
            .values(&self)
            .returning(UserImage::as_returning())
            .get_result(conn)?)
    }
}

impl UserImage {
    pub fn fetch_for_user(target: i32, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(user_images
            .filter(user_id.eq(target))
            .order(created_at.desc())
            .select(UserImage::as_select())
            .load(conn)?)
    }
}
