//! UI-only state for the public and admin views.
//!
//! None of this holds authoritative data; posts are always read from the
//! [`PostRepository`] snapshot.

use std::num::NonZeroUsize;
use std::str::FromStr;

use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::form::PostForm;
use crate::application::posts::PostRepository;
use crate::domain::entities::PostRecord;
use crate::domain::error::DomainError;

/// Which of the two views is showing. Not an access boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Public,
    Admin,
}

impl Screen {
    pub fn toggle(self) -> Self {
        match self {
            Screen::Public => Screen::Admin,
            Screen::Admin => Screen::Public,
        }
    }
}

/// A post picked either by 1-based position in the current list or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSelector {
    Position(NonZeroUsize),
    Id(Uuid),
}

impl FromStr for PostSelector {
    type Err = DomainError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Ok(position) = trimmed.parse::<usize>() {
            return NonZeroUsize::new(position)
                .map(PostSelector::Position)
                .ok_or_else(|| DomainError::invalid_selector(trimmed, "positions start at 1"));
        }
        Uuid::parse_str(trimmed)
            .map(PostSelector::Id)
            .map_err(|_| DomainError::invalid_selector(trimmed, "expected a position or a post id"))
    }
}

impl PostSelector {
    pub fn resolve<'a>(&self, posts: &'a [PostRecord]) -> Result<&'a PostRecord, DomainError> {
        let found = match self {
            PostSelector::Position(position) => posts.get(position.get() - 1),
            PostSelector::Id(id) => posts.iter().find(|post| post.id == *id),
        };
        found.ok_or_else(|| DomainError::not_found("post"))
    }
}

/// Public detail selection. Only the id is kept; the post itself is looked
/// up in the current snapshot on every render.
#[derive(Debug, Default)]
pub struct PublicView {
    selected: Option<Uuid>,
}

impl PublicView {
    pub fn select<'a>(
        &mut self,
        posts: &'a [PostRecord],
        selector: PostSelector,
    ) -> Result<&'a PostRecord, DomainError> {
        let post = selector.resolve(posts)?;
        self.selected = Some(post.id);
        Ok(post)
    }

    /// The selected post as it stands in `posts`, or `None` when nothing is
    /// selected or the post has since been removed.
    pub fn selected<'a>(&self, posts: &'a [PostRecord]) -> Option<&'a PostRecord> {
        let id = self.selected?;
        posts.iter().find(|post| post.id == id)
    }

    pub fn back(&mut self) {
        self.selected = None;
    }
}

/// Pending delete awaiting explicit acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialog {
    pub post_id: Uuid,
    pub post_title: String,
}

#[derive(Debug, Default)]
pub struct AdminView {
    form: Option<PostForm>,
    delete_dialog: Option<DeleteDialog>,
}

impl AdminView {
    pub fn open_create(&mut self) -> &mut PostForm {
        self.form.insert(PostForm::create())
    }

    pub fn open_edit(
        &mut self,
        posts: &[PostRecord],
        selector: PostSelector,
    ) -> Result<&mut PostForm, DomainError> {
        let post = selector.resolve(posts)?;
        Ok(self.form.insert(PostForm::edit(post)))
    }

    pub fn form(&self) -> Option<&PostForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submits the open form; it closes only when the save succeeds.
    pub async fn submit_form(&mut self, repo: &mut PostRepository) -> Result<(), AppError> {
        let form = self.form.as_mut().ok_or(AppError::NothingOpen("post form"))?;
        form.submit(repo).await?;
        self.form = None;
        Ok(())
    }

    pub fn request_delete(
        &mut self,
        posts: &[PostRecord],
        selector: PostSelector,
    ) -> Result<&DeleteDialog, DomainError> {
        let post = selector.resolve(posts)?;
        Ok(&*self.delete_dialog.insert(DeleteDialog {
            post_id: post.id,
            post_title: post.title.clone(),
        }))
    }

    pub fn delete_dialog(&self) -> Option<&DeleteDialog> {
        self.delete_dialog.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog = None;
    }

    /// Removes the post named by the open dialog. The dialog closes whatever
    /// the outcome; the returned flag is the repository's.
    pub async fn confirm_delete(&mut self, repo: &mut PostRepository) -> Result<bool, AppError> {
        let dialog = self
            .delete_dialog
            .take()
            .ok_or(AppError::NothingOpen("delete confirmation"))?;
        Ok(repo.remove(dialog.post_id).await)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn posts() -> Vec<PostRecord> {
        ["Second", "First"]
            .into_iter()
            .map(|title| PostRecord {
                id: Uuid::new_v4(),
                title: title.to_string(),
                content: "body".to_string(),
                author: "Ann".to_string(),
                created_at: datetime!(2025-01-05 15:04 UTC),
                updated_at: datetime!(2025-01-05 15:04 UTC),
            })
            .collect()
    }

    #[test]
    fn selectors_parse_positions_and_ids() {
        assert_eq!(
            "2".parse::<PostSelector>().expect("position"),
            PostSelector::Position(NonZeroUsize::new(2).expect("non-zero"))
        );

        let id = Uuid::new_v4();
        assert_eq!(
            id.to_string().parse::<PostSelector>().expect("id"),
            PostSelector::Id(id)
        );

        assert!(matches!(
            "0".parse::<PostSelector>(),
            Err(DomainError::InvalidSelector { .. })
        ));
        assert!(matches!(
            "latest".parse::<PostSelector>(),
            Err(DomainError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn selectors_resolve_against_the_snapshot() {
        let posts = posts();
        let by_position = "1".parse::<PostSelector>().expect("selector");
        assert_eq!(by_position.resolve(&posts).expect("post").title, "Second");

        let by_id = PostSelector::Id(posts[1].id);
        assert_eq!(by_id.resolve(&posts).expect("post").title, "First");

        let beyond = "3".parse::<PostSelector>().expect("selector");
        assert!(matches!(
            beyond.resolve(&posts),
            Err(DomainError::NotFound { entity: "post" })
        ));
    }

    #[test]
    fn public_view_selects_and_goes_back() {
        let posts = posts();
        let mut view = PublicView::default();
        let selected = view
            .select(&posts, "2".parse().expect("selector"))
            .expect("select");
        assert_eq!(selected.title, "First");
        assert_eq!(view.selected(&posts).map(|post| post.id), Some(posts[1].id));

        view.back();
        assert!(view.selected(&posts).is_none());
    }

    #[test]
    fn public_selection_follows_the_snapshot() {
        let mut posts = posts();
        let mut view = PublicView::default();
        view.select(&posts, "1".parse().expect("selector"))
            .expect("select");

        posts[0].title = "Renamed".to_string();
        assert_eq!(view.selected(&posts).expect("still there").title, "Renamed");

        posts.remove(0);
        assert!(view.selected(&posts).is_none());
    }

    #[test]
    fn delete_dialog_names_the_post_and_can_be_cancelled() {
        let posts = posts();
        let mut view = AdminView::default();
        let dialog = view
            .request_delete(&posts, "1".parse().expect("selector"))
            .expect("dialog")
            .clone();
        assert_eq!(dialog.post_id, posts[0].id);
        assert_eq!(dialog.post_title, "Second");

        view.cancel_delete();
        assert!(view.delete_dialog().is_none());
    }

    #[test]
    fn screens_toggle_both_ways() {
        assert_eq!(Screen::default(), Screen::Public);
        assert_eq!(Screen::Public.toggle(), Screen::Admin);
        assert_eq!(Screen::Admin.toggle(), Screen::Public);
    }
}
