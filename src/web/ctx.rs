//! Request-scoped identity resolution.
//!
//! The resolver verifies the bearer token and then re-fetches the user row
//! for every request. Nothing is cached between requests, so a token for a
//! user deleted after issuance stops resolving immediately.

use crate::{
    auth::jwt::TokenKeys,
    auth::token::{AuthError, AuthToken, authenticate, encode_token, session_ttl, verify_token},
    db::connection::DbConnection,
    prelude::*,
    user::api::{UserApi, UserLogin, UserLoginRequest},
    user::db::User,
    web::ApiState,
};
use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tower_cookies::{Cookie, Cookies};

/// The single identity value every handler sees.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub user: UserApi,
}

pub const AUTH_TOKEN_COOKIE: &str = "auth-token";
pub const AUTH_HEADER: &str = "Authorization";
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";

impl Ctx {
    pub fn new(user: UserApi) -> Self {
        Self { user }
    }
}

#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(state): State<ApiState>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = cookies
        .get(AUTH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            headers
                .get(AUTH_HEADER)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
                .map(|s| s.to_string())
        })
        .ok_or(AuthError::TokenMissing)
        .and_then(|token| verify_token(&token, &state.keys, Utc::now()));

    let ctx = match token {
        Ok(token) => match resolve_subject(token.sub, &state.connection) {
            Ok(ctx) => ctx,
            // A failing persistence collaborator is not an auth problem.
            Err(err) => return err.into_response(),
        },
        Err(err) => Err(err),
    };

    if ctx.is_err() {
        cookies.remove(Cookie::from(AUTH_TOKEN_COOKIE));
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Looks up the token subject. A structurally valid token for a
/// since-deleted user must not resolve, so a missing row becomes an auth
/// failure; any other lookup error stays a server-side error and surfaces
/// as a 500, never a 401.
fn resolve_subject(
    sub: i32,
    connection: &DbConnection,
) -> Result<std::result::Result<Ctx, AuthError>> {
    match User::fetch_by_id(sub, connection) {
        Ok(user) => Ok(Ok(Ctx::new(user.into()))),
        Err(Error::UserNotFound) => {
            log::debug!("Token subject {sub} no longer exists");
            Ok(Err(AuthError::InvalidToken))
        }
        Err(err) => Err(err),
    }
}

pub fn login_user(
    auth: &UserLoginRequest,
    connection: &DbConnection,
    keys: &TokenKeys,
    cookies: &Cookies,
) -> Result<UserLogin> {
    let user = authenticate(auth, connection)?;
    let token = AuthToken::new(user.user_id, Utc::now(), session_ttl())?;
    let body = encode_token(&token, keys)?;
    cookies.add(Cookie::new(AUTH_TOKEN_COOKIE, body.access_token.clone()));

    Ok(UserLogin {
        access_token: body.access_token,
        token_type: body.token_type,
        user: user.into(),
    })
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, AuthError>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}
