#![allow(dead_code)]

use std::error::Error;

use api_client::ApiClient;
use user_api::user::api::{UserLogin, UserLoginRequest, UserPost};

pub mod api_client;
pub mod db_test_context;
pub mod test_context;

pub static API: ApiClient = ApiClient {
    url: "http://localhost:3000/v1",
};

pub fn from_env(var: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| panic!("Env Variable '{}' missing", var))
}

pub fn user_post(email: &str, password: &str) -> UserPost {
    UserPost {
        username: String::from("test-user"),
        email: String::from(email),
        password: String::from(password),
        gender: None,
        birth_date: None,
    }
}

pub async fn login(
    client: &reqwest::Client,
    login_body: UserLoginRequest,
) -> Result<UserLogin, Box<dyn Error>> {
    let payload = serde_json::to_string(&login_body)?;
    let login: UserLogin = API.post(client, "login", payload).await?;
    Ok(login)
}
