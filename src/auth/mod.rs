pub mod auth_body;
pub mod jwt;
pub mod secret_hash;
pub mod token;

pub const TOKEN_TYPE: &str = "Bearer";
