use crate::{
    AppState,
    api::ApiError,
    auth::{issue_session_token, session_cookie},
    error::AppError,
    gate::{AuthResult, AuthState, Session},
    models::{CreatePostRequest, PasswordForm},
    navigation::{BLOG_PREFIX, BlogState, RouteIntent, View, resolve},
    views::{
        CreatePostTemplate, DeveloperListTemplate, GateTemplate, NotFoundTemplate,
        PostDetailTemplate, UserListTemplate, page,
    },
};
use axum::{
    Form,
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

// --- View Rendering ---

/// render_view
///
/// Mounts the view chosen by the route selector. `request_path` is the absolute
/// path that was requested; the gate uses it as its continuation target.
pub async fn render_view(
    state: &AppState,
    view: View,
    request_path: &str,
) -> Result<Response, AppError> {
    match view {
        View::Gate => page(
            StatusCode::OK,
            &GateTemplate {
                next: continuation(Some(request_path)),
                ..GateTemplate::default()
            },
        ),
        View::DeveloperList => {
            let posts = state.api.list_posts().await?;
            page(StatusCode::OK, &DeveloperListTemplate { posts })
        }
        View::UserList => {
            let posts = state.api.list_posts().await?;
            page(StatusCode::OK, &UserListTemplate { posts })
        }
        View::CreatePost => page(StatusCode::OK, &CreatePostTemplate::default()),
        View::Detail(id) => match state.api.get_post(&id).await {
            Ok(post) => page(StatusCode::OK, &PostDetailTemplate { post }),
            Err(ApiError::NotFound(_)) => not_found(request_path),
            Err(e) => Err(e.into()),
        },
        View::RedirectToRoot => Ok(Redirect::to(BLOG_PREFIX).into_response()),
        View::NotFound(_) => not_found(request_path),
    }
}

fn not_found(request_path: &str) -> Result<Response, AppError> {
    page(
        StatusCode::NOT_FOUND,
        &NotFoundTemplate {
            path: request_path.to_string(),
        },
    )
}

/// Accepts a continuation path only if it stays inside the blog subtree.
fn continuation(next: Option<&str>) -> String {
    match next {
        Some(path)
            if !path.contains("//")
                && (path == BLOG_PREFIX
                    || path
                        .strip_prefix(BLOG_PREFIX)
                        .is_some_and(|rest| rest.starts_with('/'))) =>
        {
            path.to_string()
        }
        _ => BLOG_PREFIX.to_string(),
    }
}

// --- Handlers ---

/// show_blog
///
/// [Blog Route] Renders whatever the route selector picks for the requested
/// path: a post list, the create form, a post, a redirect, or the not-found
/// page. Mounted on every GET path of the subtree, including the fallback.
#[utoipa::path(
    get,
    path = "/blog",
    responses(
        (status = 200, description = "Rendered blog view", body = String, content_type = "text/html"),
        (status = 303, description = "Redirect to the blog root"),
        (status = 404, description = "Unknown path or post", body = String, content_type = "text/html")
    )
)]
pub async fn show_blog(
    State(state): State<AppState>,
    auth: AuthState,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    let intent = RouteIntent::from_request_path(uri.path());
    let view = resolve(state.config.mode, auth, &intent);
    tracing::debug!(?intent, ?view, "resolved blog view");
    render_view(&state, view, uri.path()).await
}

/// submit_password
///
/// [Blog Route] The Access Gate form target. A granted submission stores the
/// authorized state in a session cookie and continues to `next`; a denied one
/// re-renders the gate with the inline message and the input retained.
#[utoipa::path(
    post,
    path = "/blog/access",
    request_body(content = PasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Access granted"),
        (status = 401, description = "Incorrect password", body = String, content_type = "text/html")
    )
)]
pub async fn submit_password(
    State(state): State<AppState>,
    auth: AuthState,
    jar: CookieJar,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    let next = continuation(form.next.as_deref());

    // The gate only exists while developer mode is locked.
    if BlogState::new(state.config.mode, auth) != BlogState::Locked {
        return Ok(Redirect::to(&next).into_response());
    }

    let mut session = Session::with_auth(auth);
    match session.submit_password(&form.password, state.config.access_password.as_deref()) {
        AuthResult::Granted => {
            let token = issue_session_token(&state.config)?;
            let jar = jar.add(session_cookie(token, &state.config));
            tracing::info!("blog access granted");
            Ok((jar, Redirect::to(&next)).into_response())
        }
        AuthResult::Denied(message) => {
            if let Err(e) = state.config.expected_password() {
                tracing::error!("blog access denied, gate cannot be passed: {}", e);
            } else {
                tracing::warn!("blog access denied: incorrect password");
            }
            page(
                StatusCode::UNAUTHORIZED,
                &GateTemplate {
                    error: Some(message),
                    password: form.password,
                    next,
                },
            )
        }
    }
}

/// create_post
///
/// [Developer Route] Submits a new post to the posts API and returns to the
/// developer list. Blank fields re-render the form with status 422.
#[utoipa::path(
    post,
    path = "/blog/create",
    request_body(content = CreatePostRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, or redirected away in user mode"),
        (status = 422, description = "Missing title or content", body = String, content_type = "text/html"),
        (status = 502, description = "Posts API failure")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthState,
    OriginalUri(uri): OriginalUri,
    Form(form): Form<CreatePostRequest>,
) -> Result<Response, AppError> {
    let view = resolve(state.config.mode, auth, &RouteIntent::Create);
    if view != View::CreatePost {
        return render_view(&state, view, uri.path()).await;
    }

    if let Err(message) = form.validate() {
        return page(
            StatusCode::UNPROCESSABLE_ENTITY,
            &CreatePostTemplate {
                error: Some(message.to_string()),
                title: form.title,
                content: form.content,
            },
        );
    }

    let post = state.api.create_post(form).await?;
    tracing::info!(post_id = post.id, "created post");
    Ok(Redirect::to(BLOG_PREFIX).into_response())
}

/// delete_post
///
/// [Developer Route] Deletes a post and returns to the developer list.
#[utoipa::path(
    post,
    path = "/blog/posts/{id}/delete",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 303, description = "Deleted, or redirected away in user mode"),
        (status = 404, description = "Post not found"),
        (status = 502, description = "Posts API failure")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthState,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match BlogState::new(state.config.mode, auth) {
        BlogState::Locked => render_view(&state, View::Gate, uri.path()).await,
        BlogState::User => render_view(&state, View::RedirectToRoot, uri.path()).await,
        BlogState::Developer => {
            state.api.delete_post(&id).await?;
            tracing::info!(post_id = %id, "deleted post");
            Ok(Redirect::to(BLOG_PREFIX).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::continuation;

    #[test]
    fn continuation_stays_inside_the_blog() {
        assert_eq!(continuation(Some("/blog")), "/blog");
        assert_eq!(continuation(Some("/blog/create")), "/blog/create");
        assert_eq!(continuation(Some("/blog/posts/7")), "/blog/posts/7");
        assert_eq!(continuation(Some("/blogger")), "/blog");
        assert_eq!(continuation(Some("https://evil.example")), "/blog");
        assert_eq!(continuation(Some("/blog//evil.example")), "/blog");
        assert_eq!(continuation(None), "/blog");
    }
}
