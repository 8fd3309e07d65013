//! Post CRUD handlers.
//!
//! Clients send the author as `{firstName, lastName}` and always get it
//! back flattened to a single `"firstName lastName"` string.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Author, NewPost, Post};
use blog_shared::{PostPayload, PostResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_draft(payload: PostPayload) -> NewPost {
    NewPost::new(
        payload.title,
        payload.content,
        Author::new(payload.author.first_name, payload.author.last_name),
    )
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author: post.author.full_name(),
        title: post.title,
        content: post.content,
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    tracing::debug!(count = posts.len(), "Listing posts");

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state.posts.insert(to_draft(body.into_inner())).await?;
    tracing::info!(post_id = %post.id, "Post created");

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /posts/{id}
///
/// Replaces title, content and author wholesale. Answers 201 rather than 200;
/// existing clients depend on that status.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    post.replace_with(to_draft(body.into_inner()));
    let updated = state.posts.update(post).await?;
    tracing::info!(post_id = %id, "Post updated");

    Ok(HttpResponse::Created().json(to_response(updated)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !state.posts.delete(id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
