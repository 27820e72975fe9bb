//! Route Selector
//!
//! Decides which view the `/blog` subtree presents for a request, given the
//! configured `Mode` and the session's `AuthState`. The gate check runs before
//! any route is matched.

use crate::{config::Mode, gate::AuthState};

/// Mount point of the blog subtree.
pub const BLOG_PREFIX: &str = "/blog";

/// Logical destination requested by navigation, relative to `/blog`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteIntent {
    Root,
    Create,
    Detail(String),
    Unmatched(String),
}

impl RouteIntent {
    /// Parses a path relative to the blog mount point. Leading and trailing
    /// slashes are ignored; the post id is percent-decoded and otherwise
    /// forwarded untouched.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => RouteIntent::Root,
            ["create"] => RouteIntent::Create,
            ["posts", id] if !id.is_empty() => RouteIntent::Detail(decode_segment(id)),
            _ => RouteIntent::Unmatched(path.to_string()),
        }
    }

    /// Parses an absolute request path such as `/blog/posts/7`.
    pub fn from_request_path(path: &str) -> Self {
        match path.strip_prefix(BLOG_PREFIX) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => Self::parse(rest),
            _ => RouteIntent::Unmatched(path.to_string()),
        }
    }
}

/// Raw segments that are not valid UTF-8 once decoded are kept as they are.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// The three states of the `(Mode, AuthState)` machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlogState {
    /// Developer mode, unauthorized: only the gate is reachable.
    Locked,
    /// Developer mode, authorized: full developer route table.
    Developer,
    /// User mode: auth state is irrelevant, the gate is never shown.
    User,
}

impl BlogState {
    pub fn new(mode: Mode, auth: AuthState) -> Self {
        match (mode, auth) {
            (Mode::Developer, AuthState::Unauthorized) => BlogState::Locked,
            (Mode::Developer, AuthState::Authorized) => BlogState::Developer,
            (Mode::User, _) => BlogState::User,
        }
    }
}

/// The view variant mounted for a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Gate,
    DeveloperList,
    UserList,
    CreatePost,
    Detail(String),
    /// Redirect to the blog root (`/` inside the subtree).
    RedirectToRoot,
    NotFound(String),
}

/// select_view
///
/// Resolves the route table. `Locked` wins over every intent, including
/// unmatched paths.
pub fn select_view(state: BlogState, intent: &RouteIntent) -> View {
    match (state, intent) {
        (BlogState::Locked, _) => View::Gate,

        (BlogState::Developer, RouteIntent::Root) => View::DeveloperList,
        (BlogState::User, RouteIntent::Root) => View::UserList,

        (BlogState::Developer, RouteIntent::Create) => View::CreatePost,
        (BlogState::User, RouteIntent::Create) => View::RedirectToRoot,

        (BlogState::Developer | BlogState::User, RouteIntent::Detail(id)) => {
            View::Detail(id.clone())
        }

        (BlogState::Developer | BlogState::User, RouteIntent::Unmatched(path)) => {
            View::NotFound(path.clone())
        }
    }
}

/// Convenience wrapper over `BlogState::new` and `select_view`.
pub fn resolve(mode: Mode, auth: AuthState, intent: &RouteIntent) -> View {
    select_view(BlogState::new(mode, auth), intent)
}
