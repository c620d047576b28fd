use thiserror::Error;

/// One page of a prefix listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub keys: Vec<String>,
    pub next_continuation_token: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value blob store with prefix listing.
///
/// Implementations are synchronous from the caller's point of view. A store
/// backed by an async client is expected to bridge internally.
pub trait ObjectStore {
    /// Fetches the object at `key`; fails with [`StoreError::NotFound`] when absent.
    fn get_object(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Writes `body` at `key`, replacing any existing object.
    fn put_object(&self, key: &str, body: &[u8]) -> Result<(), StoreError>;

    /// Lists one page of keys under `prefix`, resuming from `continuation_token`.
    fn list_page(
        &self,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, StoreError>;
}
