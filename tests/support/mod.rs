#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storyline::application::notify::{Notice, NoticeKind, Notifier};
use storyline::application::posts::PostRepository;
use storyline::application::repos::{PostStore, StoreError};
use storyline::domain::entities::PostRecord;
use storyline::domain::posts::{PostDraft, PostPatch};
use time::{Duration, OffsetDateTime, macros::datetime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Select,
    Insert,
    Update,
    Delete,
}

/// Posts table held in memory. Rows come back in insertion order so callers
/// have to do their own ordering, and every write advances a fake clock by a
/// minute.
pub struct InMemoryStore {
    rows: Mutex<Vec<PostRecord>>,
    clock: Mutex<OffsetDateTime>,
    failing: Mutex<HashSet<StoreOp>>,
    calls: Mutex<Vec<StoreOp>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            clock: Mutex::new(datetime!(2025-01-01 09:00 UTC)),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl InMemoryStore {
    pub fn seed(&self, title: &str, author: &str, created_at: OffsetDateTime) -> Uuid {
        let id = Uuid::new_v4();
        self.rows.lock().expect("rows").push(PostRecord {
            id,
            title: title.to_string(),
            content: format!("{title} body"),
            author: author.to_string(),
            created_at,
            updated_at: created_at,
        });
        id
    }

    pub fn fail(&self, op: StoreOp) {
        self.failing.lock().expect("failing").insert(op);
    }

    pub fn heal(&self, op: StoreOp) {
        self.failing.lock().expect("failing").remove(&op);
    }

    pub fn rows(&self) -> Vec<PostRecord> {
        self.rows.lock().expect("rows").clone()
    }

    pub fn calls(&self) -> Vec<StoreOp> {
        self.calls.lock().expect("calls").clone()
    }

    fn enter(&self, op: StoreOp) -> Result<(), StoreError> {
        self.calls.lock().expect("calls").push(op);
        if self.failing.lock().expect("failing").contains(&op) {
            return Err(StoreError::Status {
                status: 503,
                body: "store unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn tick(&self) -> OffsetDateTime {
        let mut clock = self.clock.lock().expect("clock");
        *clock += Duration::minutes(1);
        *clock
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn select_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
        self.enter(StoreOp::Select)?;
        Ok(self.rows())
    }

    async fn insert_post(&self, draft: &PostDraft) -> Result<PostRecord, StoreError> {
        self.enter(StoreOp::Insert)?;
        let now = self.tick();
        let post = PostRecord {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            author: draft.author.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().expect("rows").push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, patch: &PostPatch) -> Result<PostRecord, StoreError> {
        self.enter(StoreOp::Update)?;
        let now = self.tick();
        let mut rows = self.rows.lock().expect("rows");
        let post = rows
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(title) = &patch.title {
            post.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            post.content.clone_from(content);
        }
        if let Some(author) = &patch.author {
            post.author.clone_from(author);
        }
        post.updated_at = now;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError> {
        self.enter(StoreOp::Delete)?;
        let mut rows = self.rows.lock().expect("rows");
        let before = rows.len();
        rows.retain(|post| post.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().expect("notices"))
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices
            .lock()
            .expect("notices")
            .iter()
            .map(|notice| notice.kind)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notices").push(notice);
    }
}

pub fn repository() -> (PostRepository, Arc<InMemoryStore>, Arc<RecordingNotifier>) {
    let store = Arc::new(InMemoryStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let repo = PostRepository::new(store.clone(), notifier.clone());
    (repo, store, notifier)
}
