use crate::prelude::*;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            // Every auth failure gets the same body, whether the token was
            // missing, expired, mis-signed, or the credentials were wrong.
            Error::AuthTokenMissing
            | Error::AuthTokenExpired
            | Error::AuthInvalidToken
            | Error::WrongCredentials
            | Error::MissingCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),

            Error::EmailTaken => (StatusCode::CONFLICT, "Email already registered"),
            Error::InvalidFileName => (StatusCode::BAD_REQUEST, "Invalid file name"),
            Error::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),

            Error::StorageBackend(_) | Error::TranslationBackend(_) => {
                (StatusCode::BAD_GATEWAY, "Upstream service failure")
            }

            // Internal errors - hide details
            Error::AuthTokenCreation
            | Error::Generic(_)
            | Error::IO(_)
            | Error::JWT(_)
            | Error::PasswordHash(_)
            | Error::R2D2(_)
            | Error::Diesel(_)
            | Error::Reqwest(_)
            | Error::CtxMissing => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}
