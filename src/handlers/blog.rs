use storyline::application::{error::AppError, posts::PostRepository, views::PublicView};
use storyline::config::BlogCmd;
use storyline::presentation::views::{render_public_list, render_public_post};

use crate::io::print_view;

pub async fn handle(repo: &mut PostRepository, cmd: BlogCmd) -> Result<(), AppError> {
    super::load(repo).await?;
    match cmd {
        BlogCmd::List => print_view(&render_public_list(repo)?),
        BlogCmd::Show { post } => {
            let mut view = PublicView::default();
            let selected = view.select(repo.posts(), post)?;
            print_view(&render_public_post(selected)?);
        }
    }
    Ok(())
}
