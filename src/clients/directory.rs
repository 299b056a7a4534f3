use crate::clients::{AccountClient, PostClient};
use crate::framework::FrameworkError;
use crate::model::PostId;

/// Resolves an entity key to a callable handle.
///
/// Accounts receive the directory as their injected context and look peers up through it
/// on every call; no handle is ever persisted. Tests substitute their own implementation
/// to stand in mocked peers.
pub trait Directory: Send + Sync {
    fn account(&self, username: &str) -> Result<AccountClient, FrameworkError>;

    fn post(&self, id: PostId) -> Result<PostClient, FrameworkError>;
}
