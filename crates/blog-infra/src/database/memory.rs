//! In-memory post store - used when no database is configured, and by tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

/// Post store backed by a `Vec` behind an async RwLock.
///
/// Posts are kept in insertion order, which is also creation order.
/// Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert_many(&self, drafts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        let created: Vec<Post> = drafts.into_iter().map(NewPost::into_post).collect();

        let mut posts = self.posts.write().await;
        posts.extend(created.iter().cloned());
        tracing::debug!(inserted = created.len(), "Inserted posts");

        Ok(created)
    }

    async fn find_one(&self) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.first().cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let stored = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;

        stored.title = post.title;
        stored.content = post.content;
        stored.author = post.author;
        stored.updated_at = post.updated_at;

        Ok(stored.clone())
    }

    async fn reset(&self) -> Result<(), RepoError> {
        self.posts.write().await.clear();
        Ok(())
    }
}
