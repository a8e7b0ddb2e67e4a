use std::path::PathBuf;

use storyline::application::{error::AppError, posts::PostRepository, views::AdminView};
use storyline::config::AdminCmd;
use storyline::domain::posts::PostField;
use storyline::presentation::views::{render_admin_list, render_confirm_delete, render_form};

use crate::io::{Input, confirm, print_view, read_content, stdin_lines};

pub async fn handle(repo: &mut PostRepository, cmd: AdminCmd) -> Result<(), AppError> {
    super::load(repo).await?;
    match cmd {
        AdminCmd::List => {
            print_view(&render_admin_list(repo)?);
            Ok(())
        }
        AdminCmd::Create {
            title,
            author,
            content,
            content_file,
        } => {
            let content = read_content(content, content_file).await?;
            let mut view = AdminView::default();
            let form = view.open_create();
            form.set(PostField::Title, title);
            form.set(PostField::Author, author);
            form.set(PostField::Content, content.unwrap_or_default());
            submit(&mut view, repo).await
        }
        AdminCmd::Edit {
            post,
            title,
            author,
            content,
            content_file,
        } => {
            let changes = Changes {
                title,
                author,
                content,
                content_file,
            };
            let mut view = AdminView::default();
            view.open_edit(repo.posts(), post)?;
            changes.apply(&mut view).await?;
            submit(&mut view, repo).await
        }
        AdminCmd::Delete { post, yes } => {
            let mut view = AdminView::default();
            print_view(&render_confirm_delete(view.request_delete(repo.posts(), post)?)?);
            let mut input = stdin_lines();
            delete(&mut view, repo, &mut input, yes).await
        }
    }
}

struct Changes {
    title: Option<String>,
    author: Option<String>,
    content: Option<String>,
    content_file: Option<PathBuf>,
}

impl Changes {
    async fn apply(self, view: &mut AdminView) -> Result<(), AppError> {
        let content = read_content(self.content, self.content_file).await?;
        let form = view
            .form_mut()
            .ok_or(AppError::NothingOpen("post form"))?;
        let values = [
            (PostField::Title, self.title),
            (PostField::Author, self.author),
            (PostField::Content, content),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
        Ok(())
    }
}

/// Submits the open form and prints the refreshed list on success. On a
/// validation failure the form is printed with its errors and stays open.
pub(crate) async fn submit(view: &mut AdminView, repo: &mut PostRepository) -> Result<(), AppError> {
    match view.submit_form(repo).await {
        Ok(()) => {
            print_view(&render_admin_list(repo)?);
            Ok(())
        }
        Err(AppError::ValidationFailed(errors)) => {
            if let Some(form) = view.form() {
                print_view(&render_form(form)?);
            }
            Err(AppError::ValidationFailed(errors))
        }
        Err(err) => Err(err),
    }
}

/// Confirms the open delete dialog, asking first unless `assume_yes`.
/// Declining closes the dialog and keeps the post.
pub(crate) async fn delete(
    view: &mut AdminView,
    repo: &mut PostRepository,
    input: &mut Input,
    assume_yes: bool,
) -> Result<(), AppError> {
    if !assume_yes && !confirm(input, "Delete this story?").await? {
        view.cancel_delete();
        println!("Cancelled.");
        return Ok(());
    }

    if view.confirm_delete(repo).await? {
        print_view(&render_admin_list(repo)?);
        Ok(())
    } else {
        Err(AppError::OperationFailed)
    }
}
