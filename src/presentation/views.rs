//! Plain-text renderings of the blog and admin views.

use askama::{Error as AskamaError, Template};
use thiserror::Error;

use crate::application::form::{FormMode, PostForm};
use crate::application::notify::Notice;
use crate::application::posts::PostRepository;
use crate::application::views::DeleteDialog;
use crate::domain::entities::PostRecord;
use crate::domain::posts::{PostField, excerpt, format_human_date, format_human_datetime};

#[derive(Debug, Error)]
#[error("failed to render {view}")]
pub struct TemplateRenderError {
    pub view: &'static str,
    #[source]
    pub error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(view: &'static str, error: AskamaError) -> Self {
        Self { view, error }
    }
}

#[derive(Debug, Clone)]
pub struct PostCard {
    pub position: usize,
    pub id: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub excerpt: String,
}

impl PostCard {
    fn from_post(position: usize, post: &PostRecord) -> Self {
        Self {
            position,
            id: post.id.to_string(),
            title: post.title.clone(),
            author: post.author.clone(),
            date: format_human_date(post.created_at),
            excerpt: excerpt(&post.content),
        }
    }
}

fn cards(posts: &[PostRecord]) -> Vec<PostCard> {
    posts
        .iter()
        .enumerate()
        .map(|(index, post)| PostCard::from_post(index + 1, post))
        .collect()
}

#[derive(Template)]
#[template(path = "public/list.txt", escape = "none")]
pub struct PublicListTemplate {
    pub loading: bool,
    pub cards: Vec<PostCard>,
}

#[derive(Template)]
#[template(path = "public/post.txt", escape = "none")]
pub struct PublicPostTemplate {
    pub title: String,
    pub author: String,
    pub date: String,
    pub content: String,
}

#[derive(Template)]
#[template(path = "admin/list.txt", escape = "none")]
pub struct AdminListTemplate {
    pub loading: bool,
    pub cards: Vec<PostCard>,
}

#[derive(Debug, Clone)]
pub struct FieldErrorItem {
    pub label: &'static str,
    pub message: String,
}

#[derive(Template)]
#[template(path = "admin/form.txt", escape = "none")]
pub struct PostFormTemplate {
    pub heading: &'static str,
    pub title: String,
    pub author: String,
    pub content: String,
    pub errors: Vec<FieldErrorItem>,
    pub submitting: bool,
}

#[derive(Template)]
#[template(path = "admin/confirm_delete.txt", escape = "none")]
pub struct ConfirmDeleteTemplate {
    pub title: String,
}

pub fn render_public_list(repo: &PostRepository) -> Result<String, TemplateRenderError> {
    PublicListTemplate {
        loading: repo.is_loading(),
        cards: cards(repo.posts()),
    }
    .render()
    .map_err(|err| TemplateRenderError::new("public list", err))
}

pub fn render_public_post(post: &PostRecord) -> Result<String, TemplateRenderError> {
    PublicPostTemplate {
        title: post.title.clone(),
        author: post.author.clone(),
        date: format_human_datetime(post.created_at),
        content: post.content.clone(),
    }
    .render()
    .map_err(|err| TemplateRenderError::new("post detail", err))
}

pub fn render_admin_list(repo: &PostRepository) -> Result<String, TemplateRenderError> {
    AdminListTemplate {
        loading: repo.is_loading(),
        cards: cards(repo.posts()),
    }
    .render()
    .map_err(|err| TemplateRenderError::new("admin list", err))
}

pub fn render_form(form: &PostForm) -> Result<String, TemplateRenderError> {
    let heading = match form.mode() {
        FormMode::Create => "Create New Story",
        FormMode::Edit(_) => "Edit Your Story",
    };
    let values = form.values();
    let errors = PostField::ALL
        .into_iter()
        .filter_map(|field| {
            form.errors().get(field).map(|message| FieldErrorItem {
                label: field.label(),
                message: message.to_string(),
            })
        })
        .collect();

    PostFormTemplate {
        heading,
        title: values.title.clone(),
        author: values.author.clone(),
        content: values.content.clone(),
        errors,
        submitting: form.is_submitting(),
    }
    .render()
    .map_err(|err| TemplateRenderError::new("post form", err))
}

pub fn render_confirm_delete(dialog: &DeleteDialog) -> Result<String, TemplateRenderError> {
    ConfirmDeleteTemplate {
        title: dialog.post_title.clone(),
    }
    .render()
    .map_err(|err| TemplateRenderError::new("delete confirmation", err))
}

pub fn render_notice(notice: &Notice) -> String {
    format!(
        "[{}] {}: {}",
        notice.kind.as_str(),
        notice.title,
        notice.description
    )
}
