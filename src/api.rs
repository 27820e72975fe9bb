use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::models::{CreatePostRequest, Post};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("posts API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("post {0} not found")]
    NotFound(String),
    #[error("posts API answered with status {0}")]
    Status(u16),
    #[error("posts API unavailable: {0}")]
    Unavailable(String),
}

/// PostApi
///
/// Contract of the external posts service. Handlers only see this trait, so the
/// HTTP client can be swapped for the in-memory mock in tests.
#[async_trait]
pub trait PostApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;
    /// `id` is the opaque identifier taken from the `/posts/:id` route.
    async fn get_post(&self, id: &str) -> Result<Post, ApiError>;
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, ApiError>;
    async fn delete_post(&self, id: &str) -> Result<(), ApiError>;
}

/// PostApiState
///
/// Shared handle to the posts service stored in `AppState`.
pub type PostApiState = Arc<dyn PostApi>;

/// HttpPostApi
///
/// `PostApi` backed by a JSON REST service rooted at `base_url`
/// (e.g. `http://localhost:8000/api`, serving `/posts` and `/posts/{id}`).
#[derive(Clone)]
pub struct HttpPostApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn post_url(&self, id: &str) -> String {
        format!("{}/posts/{}", self.base_url, urlencoding::encode(id))
    }
}

/// Maps a non-success status to the matching `ApiError`.
fn check_status(status: StatusCode, id: Option<&str>) -> Result<(), ApiError> {
    if status.is_success() {
        return Ok(());
    }
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(ApiError::NotFound(id.to_string())),
        _ => Err(ApiError::Status(status.as_u16())),
    }
}

#[async_trait]
impl PostApi for HttpPostApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.client.get(self.posts_url()).send().await?;
        check_status(response.status(), None)?;
        Ok(response.json::<Vec<Post>>().await?)
    }

    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let response = self.client.get(self.post_url(id)).send().await?;
        check_status(response.status(), Some(id))?;
        Ok(response.json::<Post>().await?)
    }

    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, ApiError> {
        let response = self
            .client
            .post(self.posts_url())
            .json(&request)
            .send()
            .await?;
        check_status(response.status(), None)?;
        Ok(response.json::<Post>().await?)
    }

    async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.post_url(id)).send().await?;
        check_status(response.status(), Some(id))
    }
}

/// MockPostApi
///
/// In-memory `PostApi` for tests and offline development. Ids are assigned
/// sequentially starting at 1.
#[derive(Default)]
pub struct MockPostApi {
    posts: Mutex<Vec<Post>>,
    /// When true, every call fails with `ApiError::Unavailable`.
    pub should_fail: bool,
}

impl MockPostApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            should_fail: false,
        }
    }

    pub fn new_failing() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// Snapshot of the stored posts, for assertions.
    pub fn posts(&self) -> Vec<Post> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Post>> {
        self.posts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), ApiError> {
        if self.should_fail {
            return Err(ApiError::Unavailable(
                "Mock API Error: Simulation requested".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PostApi for MockPostApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.check_available()?;
        Ok(self.posts())
    }

    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        self.check_available()?;
        self.lock()
            .iter()
            .find(|post| post.id.to_string() == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, ApiError> {
        self.check_available()?;
        let mut posts = self.lock();
        let id = posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;
        let post = Post {
            id,
            title: request.title,
            content: request.content,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        self.check_available()?;
        let mut posts = self.lock();
        let before = posts.len();
        posts.retain(|post| post.id.to_string() != id);
        if posts.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
