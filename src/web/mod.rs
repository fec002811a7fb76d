pub mod ctx;
pub mod error;
pub mod mw_auth;

use crate::auth::jwt::TokenKeys;
use crate::db::connection::DbConnection;
use crate::storage::StorageClient;
use crate::translate::TranslationClient;

/// Shared router state. Every collaborator is constructed in `main` and
/// injected here; nothing is process-global.
#[derive(Clone)]
pub struct ApiState {
    pub connection: DbConnection,
    pub keys: TokenKeys,
    pub storage: StorageClient,
    pub translator: TranslationClient,
}
