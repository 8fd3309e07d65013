//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder};

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert_many(&self, drafts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let posts: Vec<Post> = drafts.into_iter().map(NewPost::into_post).collect();
        let models = posts.iter().cloned().map(post::ActiveModel::from);

        let inserted = PostEntity::insert_many(models)
            .exec_without_returning(&self.db)
            .await
            .map_err(repo_error)?;
        tracing::debug!(inserted, "Inserted posts");

        Ok(posts)
    }

    async fn find_one(&self) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(repo_error)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %post.id, "Updating post");

        // created_at is left out so the stored value survives.
        let changes = post::ActiveModel {
            id: Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            author_first_name: Set(post.author.first_name),
            author_last_name: Set(post.author.last_name),
            created_at: NotSet,
            updated_at: Set(post.updated_at.into()),
        };

        let model = changes.update(&self.db).await.map_err(repo_error)?;
        Ok(model.into())
    }

    async fn reset(&self) -> Result<(), RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(repo_error)?;
        tracing::debug!(removed = result.rows_affected, "Reset post store");

        Ok(())
    }
}
