use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Generic repository trait defining lookups and removal by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    ///
    /// Idempotent: returns `Ok(false)` when nothing matched.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Persist every draft, assigning fresh ids. Output keeps input order.
    async fn insert_many(&self, drafts: Vec<NewPost>) -> Result<Vec<Post>, RepoError>;

    /// The earliest created post, if any.
    async fn find_one(&self) -> Result<Option<Post>, RepoError>;

    /// Every post, oldest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;

    /// Overwrite title, content and author of an existing post.
    ///
    /// Returns [`RepoError::NotFound`] when no post has this id.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Remove every post.
    async fn reset(&self) -> Result<(), RepoError>;

    async fn insert(&self, draft: NewPost) -> Result<Post, RepoError> {
        self.insert_many(vec![draft])
            .await?
            .pop()
            .ok_or_else(|| RepoError::Query("insert returned no rows".to_string()))
    }
}
