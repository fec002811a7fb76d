use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::secret_hash::generate_secret_hash;
use crate::db::connection::DbConnection;
use crate::prelude::*;

use super::db::{User, UserChanges, UserCreate};

/// Public view of a user. Never carries the stored hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserApi {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub gender: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserPost {
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the token plus a snapshot of the identity it belongs to.
#[derive(Debug, Deserialize, Serialize)]
pub struct UserLogin {
    pub access_token: String,
    pub token_type: String,
    pub user: UserApi,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserUpdateRequest {
    pub username: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

impl From<User> for UserApi {
    fn from(value: User) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            email: value.email,
            gender: value.gender,
            birth_date: value.birth_date,
        }
    }
}

impl TryFrom<UserPost> for UserCreate {
    type Error = Error;

    fn try_from(value: UserPost) -> Result<Self> {
        let hash = generate_secret_hash(&value.password)?;
        Ok(Self {
            username: value.username,
            email: value.email,
            hash,
            gender: value.gender,
            birth_date: value.birth_date,
        })
    }
}

impl From<UserUpdateRequest> for UserChanges {
    fn from(value: UserUpdateRequest) -> Self {
        Self {
            username: value.username,
            gender: value.gender,
            birth_date: value.birth_date,
            updated_at: Utc::now(),
        }
    }
}

impl UserPost {
    pub fn persist(self, connection: &DbConnection) -> Result<UserApi> {
        match User::fetch_by_email(&self.email, connection) {
            Ok(_) => return Err(Error::EmailTaken),
            Err(Error::UserNotFound) => {}
            Err(err) => return Err(err),
        }

        let model: UserCreate = self.try_into()?;
        match model.save(connection) {
            // Backstop for concurrent registrations racing past the lookup.
            Err(Error::Diesel(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ))) => Err(Error::EmailTaken),
            other => Ok(other?.into()),
        }
    }
}
