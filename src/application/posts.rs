//! Session-scoped owner of the post list.
//!
//! Every mutation goes straight to the record store and is followed by a full
//! re-fetch; the local list is never patched in place. Store failures stop
//! here: they are logged, turned into a single failure notice, and reported
//! to the caller as `false`.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;
use crate::application::notify::{Notice, Notifier};
use crate::application::repos::{PostStore, StoreError};
use crate::domain::entities::PostRecord;
use crate::domain::posts::{PostDraft, PostPatch, sort_newest_first};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::Fetch => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Fetches succeed silently.
    fn success_text(self) -> Option<&'static str> {
        match self {
            Operation::Fetch => None,
            Operation::Create => Some("Blog post created successfully"),
            Operation::Update => Some("Blog post updated successfully"),
            Operation::Delete => Some("Blog post deleted successfully"),
        }
    }

    fn failure_text(self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch blog posts",
            Operation::Create => "Failed to create blog post",
            Operation::Update => "Failed to update blog post",
            Operation::Delete => "Failed to delete blog post",
        }
    }
}

pub struct PostRepository {
    store: Arc<dyn PostStore>,
    notifier: Arc<dyn Notifier>,
    posts: Vec<PostRecord>,
    loading: bool,
    activated: bool,
}

impl PostRepository {
    /// A repository that has not loaded anything yet; `is_loading` is `true`
    /// until the first fetch settles.
    pub fn new(store: Arc<dyn PostStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            posts: Vec::new(),
            loading: true,
            activated: false,
        }
    }

    /// Runs the initial load. Later calls do nothing.
    pub async fn activate(&mut self) {
        if self.activated {
            return;
        }
        self.activated = true;
        self.list().await;
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, id: Uuid) -> Option<&PostRecord> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Replaces the snapshot with the store's current contents.
    ///
    /// On failure the previous snapshot is kept and a failure notice is sent.
    pub async fn list(&mut self) -> bool {
        self.fetch(true).await
    }

    pub async fn create(&mut self, draft: &PostDraft) -> bool {
        let result = self.store.insert_post(draft).await.map(|post| {
            debug!(id = %post.id, "blog post created");
        });
        self.settle(Operation::Create, result).await
    }

    pub async fn update(&mut self, id: Uuid, patch: &PostPatch) -> bool {
        let result = self.store.update_post(id, patch).await.map(|post| {
            debug!(id = %post.id, updated_at = %post.updated_at, "blog post updated");
        });
        self.settle(Operation::Update, result).await
    }

    pub async fn remove(&mut self, id: Uuid) -> bool {
        let result = self.store.delete_post(id).await.inspect(|()| {
            debug!(id = %id, "blog post deleted");
        });
        self.settle(Operation::Delete, result).await
    }

    async fn fetch(&mut self, report_failure: bool) -> bool {
        self.loading = true;
        let result = self.store.select_posts().await;
        record_request(Operation::Fetch, result.is_ok());

        let fetched = match result {
            Ok(mut posts) => {
                sort_newest_first(&mut posts);
                debug!(count = posts.len(), "blog posts fetched");
                self.posts = posts;
                true
            }
            Err(err) => {
                log_store_failure(Operation::Fetch, &err);
                if report_failure {
                    self.notify(Notice::failure(Operation::Fetch.failure_text()));
                }
                false
            }
        };

        self.loading = false;
        fetched
    }

    async fn settle(&mut self, op: Operation, result: Result<(), StoreError>) -> bool {
        record_request(op, result.is_ok());
        match result {
            Ok(()) => {
                if let Some(text) = op.success_text() {
                    self.notify(Notice::success(text));
                }
                // The mutation already reported success; a failed refresh only
                // leaves the previous snapshot in place.
                self.fetch(false).await;
                true
            }
            Err(err) => {
                log_store_failure(op, &err);
                self.notify(Notice::failure(op.failure_text()));
                false
            }
        }
    }

    fn notify(&self, notice: Notice) {
        counter!("storyline_notifications_total", "kind" => notice.kind.as_str()).increment(1);
        self.notifier.notify(notice);
    }
}

fn record_request(op: Operation, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!(
        "storyline_store_requests_total",
        "op" => op.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

fn log_store_failure(op: Operation, err: &StoreError) {
    let report = ErrorReport::from_error(err);
    warn!(op = op.as_str(), error = %report.joined(), "record store call failed");
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;
    use crate::application::notify::NoticeKind;

    #[derive(Default)]
    struct FlakyStore {
        rows: Mutex<Vec<PostRecord>>,
        fail_select: Mutex<bool>,
    }

    #[async_trait]
    impl PostStore for FlakyStore {
        async fn select_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
            if *self.fail_select.lock().expect("lock") {
                return Err(StoreError::Transport("offline".into()));
            }
            Ok(self.rows.lock().expect("lock").clone())
        }

        async fn insert_post(&self, draft: &PostDraft) -> Result<PostRecord, StoreError> {
            let now = OffsetDateTime::now_utc();
            let post = PostRecord {
                id: Uuid::new_v4(),
                title: draft.title.clone(),
                content: draft.content.clone(),
                author: draft.author.clone(),
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().expect("lock").insert(0, post.clone());
            Ok(post)
        }

        async fn update_post(&self, _id: Uuid, _patch: &PostPatch) -> Result<PostRecord, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn delete_post(&self, _id: Uuid) -> Result<(), StoreError> {
            Err(StoreError::NotFound)
        }
    }

    #[derive(Default)]
    struct Notices(Mutex<Vec<Notice>>);

    impl Notifier for Notices {
        fn notify(&self, notice: Notice) {
            self.0.lock().expect("lock").push(notice);
        }
    }

    fn repo() -> (PostRepository, Arc<FlakyStore>, Arc<Notices>) {
        let store = Arc::new(FlakyStore::default());
        let notices = Arc::new(Notices::default());
        let repo = PostRepository::new(store.clone(), notices.clone());
        (repo, store, notices)
    }

    #[tokio::test]
    async fn starts_loading_and_activates_once() {
        let (mut repo, store, notices) = repo();
        assert!(repo.is_loading());

        repo.activate().await;
        assert!(!repo.is_loading());

        *store.fail_select.lock().expect("lock") = true;
        repo.activate().await;
        assert!(notices.0.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_after_create_sends_only_the_success_notice() {
        let (mut repo, store, notices) = repo();
        repo.activate().await;
        *store.fail_select.lock().expect("lock") = true;

        assert!(repo.create(&PostDraft::new("T", "C", "A")).await);

        let notices = notices.0.lock().expect("lock");
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);
        assert!(repo.posts().is_empty());
        assert!(!repo.is_loading());
    }

    #[tokio::test]
    async fn missing_ids_surface_as_failures() {
        let (mut repo, _store, notices) = repo();
        repo.activate().await;

        assert!(!repo.update(Uuid::new_v4(), &PostPatch::default()).await);
        assert!(!repo.remove(Uuid::new_v4()).await);

        let notices = notices.0.lock().expect("lock");
        let texts: Vec<_> = notices.iter().map(|n| n.description.as_str()).collect();
        assert_eq!(
            texts,
            ["Failed to update blog post", "Failed to delete blog post"]
        );
        assert!(notices.iter().all(|n| n.kind == NoticeKind::Failure));
    }
}
