pub mod admin;
pub mod blog;
pub mod shell;

use storyline::application::{error::AppError, posts::PostRepository};

/// One-shot commands need a fresh snapshot; a failed load has already been
/// reported by the repository.
pub async fn load(repo: &mut PostRepository) -> Result<(), AppError> {
    if repo.list().await {
        Ok(())
    } else {
        Err(AppError::OperationFailed)
    }
}
