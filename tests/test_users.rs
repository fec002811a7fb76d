//! End-to-end tests against a running server (`cargo run --bin server`) and
//! the database named by DATABASE_URL. Ignored by default.

use std::error::Error;

use common::{API, login, test_context::TestContext, user_post};
use reqwest::StatusCode;
use serial_test::serial;
use user_api::user::api::{UserApi, UserLoginRequest};

mod common;

#[tokio::test]
#[serial]
#[ignore = "requires a running server and database"]
async fn test_register_and_read_self() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let new_user = user_post("a@x.com", "secret123");
    let payload = serde_json::to_string(&new_user)?;
    let registered: UserApi = API.post(&client, "register", payload.clone()).await?;
    assert_eq!(registered.email, new_user.email);

    // Response must never echo the credential.
    let raw = serde_json::to_value(&registered)?;
    assert!(raw.get("password").is_none());
    assert!(raw.get("hash").is_none());

    let login_result = login(
        &client,
        UserLoginRequest {
            email: new_user.email.clone(),
            password: new_user.password.clone(),
        },
    )
    .await?;
    assert_eq!(login_result.token_type, "Bearer");
    assert_eq!(login_result.user.user_id, registered.user_id);

    // Cookie from login authenticates the read-self call.
    let me: UserApi = API.get(&client, "me").await?;
    assert_eq!(me.user_id, registered.user_id);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running server and database"]
async fn test_duplicate_email_conflicts() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let new_user = user_post("a@x.com", "secret123");
    let payload = serde_json::to_string(&new_user)?;
    let _: UserApi = API.post(&client, "register", payload.clone()).await?;

    let status = API.post_status(&client, "register", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running server and database"]
async fn test_wrong_password_rejected() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let new_user = user_post("a@x.com", "secret123");
    let payload = serde_json::to_string(&new_user)?;
    let _: UserApi = API.post(&client, "register", payload).await?;

    let bad_login = serde_json::to_string(&UserLoginRequest {
        email: String::from("a@x.com"),
        password: String::from("wrong-password"),
    })?;
    let status = API.post_status(&client, "login", bad_login).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unknown email must look exactly the same.
    let unknown_login = serde_json::to_string(&UserLoginRequest {
        email: String::from("nobody@x.com"),
        password: String::from("secret123"),
    })?;
    let status = API.post_status(&client, "login", unknown_login).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running server and database"]
async fn test_update_profile() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let new_user = user_post("a@x.com", "secret123");
    let payload = serde_json::to_string(&new_user)?;
    let registered: UserApi = API.post(&client, "register", payload).await?;
    login(
        &client,
        UserLoginRequest {
            email: new_user.email,
            password: new_user.password,
        },
    )
    .await?;

    let updated: UserApi = API
        .patch(&client, "me", r#"{"username":"renamed"}"#)
        .await?;
    assert_eq!(updated.username, "renamed");
    // Untouched fields survive a partial update.
    assert_eq!(updated.email, registered.email);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running server and database"]
async fn test_upload_with_traversal_name_rejected() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let new_user = user_post("a@x.com", "secret123");
    let payload = serde_json::to_string(&new_user)?;
    let _: UserApi = API.post(&client, "register", payload).await?;
    login(
        &client,
        UserLoginRequest {
            email: new_user.email,
            password: new_user.password,
        },
    )
    .await?;

    // A name with path segments would land in another user's namespace.
    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(vec![0xFF, 0xD8])
            .file_name("../8/stolen.png")
            .mime_str("image/png")?,
    );
    let response = client
        .post("http://localhost:3000/v1/me/images")
        .multipart(form)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running server and database"]
async fn test_listing_is_newest_first() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    for email in ["first@x.com", "second@x.com", "third@x.com"] {
        let payload = serde_json::to_string(&user_post(email, "secret123"))?;
        let _: UserApi = API.post(&client, "register", payload).await?;
    }

    let users: Vec<UserApi> = API.get(&client, "users?skip=0&limit=2").await?;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "third@x.com");
    assert_eq!(users[1].email, "second@x.com");

    Ok(())
}
