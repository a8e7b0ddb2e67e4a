//! Record-store trait describing the remote posts table.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::PostRecord;
use crate::domain::posts::{PostDraft, PostPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("store responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode store response: {0}")]
    Decode(String),
    #[error("record not found")]
    NotFound,
}

impl StoreError {
    pub fn from_transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn from_decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Select/insert/update/delete over the single posts collection.
///
/// Implementations assign `id`, `created_at` and `updated_at` themselves; the
/// client never fabricates them.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, newest `created_at` first.
    async fn select_posts(&self) -> Result<Vec<PostRecord>, StoreError>;

    async fn insert_post(&self, draft: &PostDraft) -> Result<PostRecord, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no row carries `id`.
    async fn update_post(&self, id: Uuid, patch: &PostPatch) -> Result<PostRecord, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no row carries `id`.
    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError>;
}
