//! Create/edit form state for a single post.

use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::posts::PostRepository;
use crate::domain::entities::PostRecord;
use crate::domain::posts::{PostDraft, PostField, PostPatch};
use crate::domain::validation::{FieldErrors, validate_draft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

#[derive(Debug, Clone)]
pub struct PostForm {
    mode: FormMode,
    values: PostDraft,
    errors: FieldErrors,
    submitting: bool,
}

impl PostForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            values: PostDraft::default(),
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    /// A form pre-populated with the post's current fields.
    pub fn edit(post: &PostRecord) -> Self {
        Self {
            mode: FormMode::Edit(post.id),
            values: PostDraft::from(post),
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn values(&self) -> &PostDraft {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Editing a field hides whatever error it was showing.
    pub fn set(&mut self, field: PostField, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.errors.clear(field);
    }

    /// Validates, then creates or updates through `repo`.
    ///
    /// Fields are cleared only when the repository reports success. Failed
    /// validation never reaches the repository.
    pub async fn submit(&mut self, repo: &mut PostRepository) -> Result<(), AppError> {
        if self.submitting {
            return Err(AppError::SubmissionInFlight);
        }

        let errors = validate_draft(&self.values);
        self.errors = errors.clone();
        if !errors.is_empty() {
            return Err(AppError::ValidationFailed(errors));
        }

        self.submitting = true;
        let saved = match self.mode {
            FormMode::Create => repo.create(&self.values).await,
            FormMode::Edit(id) => {
                let patch = PostPatch::from(self.values.clone());
                repo.update(id, &patch).await
            }
        };
        self.submitting = false;

        if saved {
            self.values = PostDraft::default();
            Ok(())
        } else {
            Err(AppError::OperationFailed)
        }
    }
}
