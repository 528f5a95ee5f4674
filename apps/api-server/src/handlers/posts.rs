//! Post handlers: feed, CRUD and the like toggle.
//!
//! Create and update accept multipart form data because posts may carry an
//! image upload alongside their text fields.

use std::collections::HashMap;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use skillswap_core::domain::Post;
use skillswap_shared::dto::{DeletedResponse, LikeResponse, PostResponse, SkillResponse, UserSummary};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::realtime::RealtimeGateway;
use crate::state::AppState;

#[derive(MultipartForm)]
pub struct CreatePostForm {
    pub title: Option<Text<String>>,
    pub content: Option<Text<String>>,
    #[multipart(rename = "skillId")]
    pub skill_id: Option<Text<Uuid>>,
    pub image: Option<TempFile>,
}

#[derive(MultipartForm)]
pub struct UpdatePostForm {
    pub title: Option<Text<String>>,
    pub content: Option<Text<String>>,
    #[multipart(rename = "skillId")]
    pub skill_id: Option<Text<Uuid>>,
    pub image: Option<TempFile>,
}

/// GET /api/posts - Public feed
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let responses = populate_many(&state, posts).await?;

    Ok(HttpResponse::Ok().json(responses))
}

/// POST /api/posts - Protected, multipart
pub async fn create(
    state: web::Data<AppState>,
    gateway: web::Data<RealtimeGateway>,
    identity: Identity,
    form: MultipartForm<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let title = match form.title {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => return Err(AppError::BadRequest("title is required".to_string())),
    };
    let content = match form.content {
        Some(c) if !c.trim().is_empty() => c.into_inner(),
        _ => return Err(AppError::BadRequest("content is required".to_string())),
    };
    let skill_id = form
        .skill_id
        .map(|s| s.into_inner())
        .ok_or_else(|| AppError::BadRequest("skillId is required".to_string()))?;

    state
        .skills
        .find_by_id(skill_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;

    let mut post = Post::new(identity.user_id, skill_id, title, content);
    if let Some(image) = form.image {
        post.images.push(store_image(image)?);
    }

    let post = state.posts.insert(post).await?;
    tracing::info!(post_id = %post.id, author_id = %identity.user_id, "Post created");

    let response = populate(&state, post).await?;
    gateway.post_created(&response);

    Ok(HttpResponse::Created().json(response))
}

/// PATCH /api/posts/{id} - Protected, author only
pub async fn update(
    state: web::Data<AppState>,
    gateway: web::Data<RealtimeGateway>,
    identity: Identity,
    path: web::Path<Uuid>,
    form: MultipartForm<UpdatePostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden(
            "Not authorized to edit this post".to_string(),
        ));
    }

    if let Some(title) = form.title {
        if title.trim().is_empty() {
            return Err(AppError::BadRequest("title cannot be empty".to_string()));
        }
        post.title = title.trim().to_string();
    }
    if let Some(content) = form.content {
        post.content = content.into_inner();
    }
    if let Some(skill_id) = form.skill_id {
        let skill_id = skill_id.into_inner();
        state
            .skills
            .find_by_id(skill_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;
        post.skill_id = skill_id;
    }
    if let Some(image) = form.image {
        // Images accumulate; an update never drops previous uploads.
        post.images.push(store_image(image)?);
    }
    post.updated_at = chrono::Utc::now();

    let post = state.posts.update(post).await?;

    let response = populate(&state, post).await?;
    gateway.post_updated(&response);

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/posts/{id} - Protected, author only
pub async fn delete(
    state: web::Data<AppState>,
    gateway: web::Data<RealtimeGateway>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden(
            "Not authorized to delete this post".to_string(),
        ));
    }

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    gateway.post_deleted(id);

    Ok(HttpResponse::Ok().json(DeletedResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

/// POST /api/posts/{id}/like - Protected
pub async fn toggle_like(
    state: web::Data<AppState>,
    gateway: web::Data<RealtimeGateway>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let likes = state.posts.toggle_like(id, identity.user_id).await?;

    let response = LikeResponse { post_id: id, likes };
    gateway.post_liked(&response);

    Ok(HttpResponse::Ok().json(response))
}

/// Attach author, skill and like-set to a single post.
async fn populate(state: &AppState, post: Post) -> AppResult<PostResponse> {
    populate_many(state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Post references a missing author or skill".to_string()))
}

/// Attach authors, skills and like-sets to a batch of posts with two bulk
/// lookups. Posts whose author or skill no longer exists are dropped.
async fn populate_many(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    let author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    let skill_ids: Vec<Uuid> = posts.iter().map(|p| p.skill_id).collect();

    let authors: HashMap<Uuid, UserSummary> = state
        .users
        .find_by_ids(&author_ids)
        .await?
        .iter()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect();
    let skills: HashMap<Uuid, SkillResponse> = state
        .skills
        .find_by_ids(&skill_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, SkillResponse::from(s)))
        .collect();

    let mut responses = Vec::with_capacity(posts.len());
    for post in posts {
        let (author, skill) = match (authors.get(&post.author_id), skills.get(&post.skill_id)) {
            (Some(author), Some(skill)) => (author.clone(), skill.clone()),
            _ => {
                tracing::warn!(post_id = %post.id, "Dropping post with dangling references");
                continue;
            }
        };
        let likes = state.posts.likes_of(post.id).await?;
        responses.push(PostResponse {
            id: post.id,
            title: post.title,
            content: post.content,
            images: post.images,
            author,
            skill,
            likes,
            created_at: post.created_at,
            updated_at: post.updated_at,
        });
    }

    Ok(responses)
}

/// Store an uploaded image on local disk and return its public path.
///
/// Storage is process-local; a multi-replica deployment needs a shared object
/// store behind the same URL space.
fn store_image(image: TempFile) -> AppResult<String> {
    let ext = image
        .file_name
        .as_deref()
        .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_string()))
        .unwrap_or_else(|| "bin".to_string());
    let name = format!("{}.{}", Uuid::new_v4(), ext);

    std::fs::create_dir_all("uploads")
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {e}")))?;
    std::fs::copy(image.file.path(), format!("uploads/{name}"))
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

    Ok(format!("/uploads/{name}"))
}
