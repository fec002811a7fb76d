pub mod auth;
pub mod db;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod storage;
pub mod translate;
pub mod user;
pub mod web;
