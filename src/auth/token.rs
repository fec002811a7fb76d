use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::TokenKeys;
use crate::auth::secret_hash::is_secret_valid;
use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::user::api::UserLoginRequest;
use crate::user::db::User;

use super::auth_body::AuthBody;

const ISS: &str = "USER-API";

/// Canonical session lifetime. Tokens carry the user id in `sub` and this
/// TTL in `exp`; both are fixed policy for every call site.
pub fn session_ttl() -> TimeDelta {
    TimeDelta::hours(24)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthToken {
    pub sub: i32,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, thiserror::Error, Clone)]
pub enum AuthError {
    #[error("Invalid Token")]
    InvalidToken,
    #[error("Token Missing")]
    TokenMissing,
    #[error("Token Expired")]
    TokenExpired,
    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::TokenCreation(jwt_error) => Self::JWT(jwt_error),
            AuthError::InvalidToken => Self::AuthInvalidToken,
            AuthError::TokenMissing => Self::AuthTokenMissing,
            AuthError::TokenExpired => Self::AuthTokenExpired,
        }
    }
}

impl AuthToken {
    pub fn new(user_id: i32, now: DateTime<Utc>, token_duration: TimeDelta) -> Result<Self> {
        let expiration = now
            .checked_add_signed(token_duration)
            .ok_or(Error::AuthTokenCreation)?;

        Ok(Self {
            sub: user_id,
            iss: String::from(ISS),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        })
    }
}

/// Checks the supplied credentials against the stored hash.
///
/// An unknown email and a wrong password fail identically, so callers cannot
/// probe which addresses are registered.
pub fn authenticate(auth: &UserLoginRequest, connection: &DbConnection) -> Result<User> {
    if auth.password.is_empty() {
        return Err(Error::MissingCredentials);
    }
    let user = User::fetch_by_email(&auth.email, connection).map_err(|_| Error::WrongCredentials)?;
    if !is_secret_valid(&auth.password, &user.hash) {
        return Err(Error::WrongCredentials);
    }
    Ok(user)
}

pub fn encode_token(token: &AuthToken, keys: &TokenKeys) -> Result<AuthBody> {
    let token = keys.jwt_encode(&token).map_err(|err| {
        log::error!("Failed to encode JWT {err}");
        err
    })?;

    Ok(AuthBody::new(token))
}

/// Verifies signature first, then expiry against the explicit `now`. Both
/// failures surface to the HTTP layer as the same 401.
pub fn verify_token(
    token: &str,
    keys: &TokenKeys,
    now: DateTime<Utc>,
) -> std::result::Result<AuthToken, AuthError> {
    let claims = keys
        .jwt_decode::<AuthToken>(token)
        .map_err(|err| {
            log::debug!("Failed to decode jwt token {err}");
            AuthError::InvalidToken
        })?
        .claims;

    if claims.exp < now.timestamp() {
        return Err(AuthError::TokenExpired);
    }
    Ok(claims)
}
