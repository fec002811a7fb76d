use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use serde::Deserialize;
use tower_cookies::{Cookie, CookieManagerLayer, Cookies};
use user_api::{
    db::{config::DbConfig, connection::DbConnection},
    prelude::*,
    storage::{StorageClient, StorageConfig, is_safe_file_name},
    translate::{TranslateConfig, TranslationApi, TranslationClient, TranslationRequest},
    user::{
        api::{UserApi, UserLogin, UserLoginRequest, UserPost, UserUpdateRequest},
        db::{User, UserChanges},
        image::{ImageApi, UserImage, UserImageCreate},
    },
    web::{
        ApiState,
        ctx::{AUTH_TOKEN_COOKIE, Ctx, login_user, mw_ctx_resolver},
        mw_auth::mw_require_auth,
    },
};

use user_api::auth::jwt::{TokenConfig, TokenKeys};

use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn v1(path: &str) -> String {
    format!("/v1/{path}")
}

#[derive(Debug, Deserialize)]
struct PageParams {
    skip: Option<i64>,
    limit: Option<i64>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = DbConnection::new(&DbConfig::from_env()).setup();
    let api_state = ApiState {
        connection: db,
        keys: TokenKeys::new(&TokenConfig::from_env()),
        storage: StorageClient::new(&StorageConfig::from_env()),
        translator: TranslationClient::new(&TranslateConfig::from_env()),
    };

    let app = Router::new()
        .route(&v1("me"), get(read_self).patch(update_self).delete(delete_self))
        .route(&v1("me/images"), get(list_images).post(upload_image))
        .route(&v1("translate"), post(translate_text))
        .route_layer(middleware::from_fn(mw_require_auth))
        .route(&v1("register"), post(register))
        .route(&v1("login"), post(login))
        .route(&v1("users"), get(list_users))
        .route(&v1("users/{user_id}"), get(read_user))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            api_state.clone(),
            mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(api_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();
    tracing::debug!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

#[axum::debug_handler]
async fn register(
    State(state): State<ApiState>,
    Json(payload): Json<UserPost>,
) -> Result<Json<UserApi>> {
    Ok(Json(payload.persist(&state.connection)?))
}

#[axum::debug_handler]
async fn login(
    State(state): State<ApiState>,
    cookies: Cookies,
    Json(payload): Json<UserLoginRequest>,
) -> Result<Json<UserLogin>> {
    Ok(Json(login_user(
        &payload,
        &state.connection,
        &state.keys,
        &cookies,
    )?))
}

#[axum::debug_handler]
async fn list_users(
    State(state): State<ApiState>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<UserApi>>> {
    let users = User::fetch_page(
        page.skip.unwrap_or(0),
        page.limit.unwrap_or(10),
        &state.connection,
    )?;
    Ok(Json(users.into_iter().map(UserApi::from).collect()))
}

#[axum::debug_handler]
async fn read_user(
    State(state): State<ApiState>,
    Path(target): Path<i32>,
) -> Result<Json<UserApi>> {
    Ok(Json(User::fetch_by_id(target, &state.connection)?.into()))
}

#[axum::debug_handler]
async fn read_self(ctx: Ctx) -> Json<UserApi> {
    Json(ctx.user)
}

#[axum::debug_handler]
async fn update_self(
    State(state): State<ApiState>,
    ctx: Ctx,
    Json(payload): Json<UserUpdateRequest>,
) -> Result<Json<UserApi>> {
    let changes = UserChanges::from(payload);
    Ok(Json(
        User::update(ctx.user.user_id, &changes, &state.connection)?.into(),
    ))
}

#[axum::debug_handler]
async fn delete_self(
    State(state): State<ApiState>,
    cookies: Cookies,
    ctx: Ctx,
) -> Result<StatusCode> {
    User::delete(ctx.user.user_id, &state.connection)?;
    cookies.remove(Cookie::from(AUTH_TOKEN_COOKIE));
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
async fn upload_image(
    State(state): State<ApiState>,
    ctx: Ctx,
    mut multipart: Multipart,
) -> Result<Json<ImageApi>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| Error::Generic(format!("Invalid multipart body: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        if !is_safe_file_name(&file_name) {
            return Err(Error::InvalidFileName);
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| Error::Generic(format!("Failed to read upload: {err}")))?;

        // Objects are namespaced by the resolved identity, never by
        // anything client-supplied beyond the file name.
        let object = format!("{}/{file_name}", ctx.user.user_id);
        let url = state
            .storage
            .put(&object, bytes.to_vec(), &content_type)
            .await?;

        let image = UserImageCreate {
            user_id: ctx.user.user_id,
            file_name,
            url,
        }
        .save(&state.connection)?;
        return Ok(Json(image.into()));
    }
    Err(Error::Generic(String::from(
        "Missing 'file' field in multipart body",
    )))
}

#[axum::debug_handler]
async fn list_images(State(state): State<ApiState>, ctx: Ctx) -> Result<Json<Vec<ImageApi>>> {
    let images = UserImage::fetch_for_user(ctx.user.user_id, &state.connection)?;
    Ok(Json(images.into_iter().map(ImageApi::from).collect()))
}

#[axum::debug_handler]
async fn translate_text(
    State(state): State<ApiState>,
    _ctx: Ctx,
    Json(payload): Json<TranslationRequest>,
) -> Result<Json<TranslationApi>> {
    let translated_text = state
        .translator
        .translate(&payload.text, &payload.target_language)
        .await?;
    Ok(Json(TranslationApi {
        translated_text,
        target_language: payload.target_language,
    }))
}
