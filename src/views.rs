//! Server-side rendered pages of the blog subtree (askama templates under
//! `templates/`).

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{error::AppError, models::Post};

/// Password prompt shown while developer mode is locked.
#[derive(Template, Default)]
#[template(path = "gate.html")]
pub struct GateTemplate {
    pub error: Option<String>,
    /// Last submitted value, retained for resubmission.
    pub password: String,
    /// Blog path to continue to after a granted submission.
    pub next: String,
}

#[derive(Template)]
#[template(path = "developer_list.html")]
pub struct DeveloperListTemplate {
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "user_list.html")]
pub struct UserListTemplate {
    pub posts: Vec<Post>,
}

#[derive(Template, Default)]
#[template(path = "create_post.html")]
pub struct CreatePostTemplate {
    pub error: Option<String>,
    pub title: String,
    pub content: String,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailTemplate {
    pub post: Post,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

/// Renders a template into an HTML response with the given status.
pub fn page<T: Template>(status: StatusCode, template: &T) -> Result<Response, AppError> {
    let body = template.render()?;
    Ok((status, Html(body)).into_response())
}
