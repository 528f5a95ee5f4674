//! User profile handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use skillswap_shared::dto::{DeletedResponse, UpdateUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users - Public directory
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;

    let mut responses = Vec::with_capacity(users.len());
    for user in users {
        let skills = state.users.skills_of(user.id).await?;
        responses.push(UserResponse::from_parts(user, skills));
    }

    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/users/{id} - Public
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    let skills = state.users.skills_of(user.id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from_parts(user, skills)))
}

/// PUT /api/users/{id} - Protected, self only
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if id != identity.user_id {
        return Err(AppError::Forbidden(
            "Not authorized to edit this profile".to_string(),
        ));
    }

    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("name cannot be empty".to_string()));
        }
        user.name = name.trim().to_string();
    }
    if let Some(image) = req.image {
        user.image = Some(image);
    }
    if let Some(bio) = req.bio {
        user.bio = Some(bio);
    }
    user.updated_at = chrono::Utc::now();

    let user = state.users.update(user).await?;

    // Skill sets are replaced wholesale; an absent field keeps the current set.
    if req.skills_to_share.is_some() || req.skills_to_learn.is_some() {
        let current = state.users.skills_of(user.id).await?;
        let to_share = req
            .skills_to_share
            .unwrap_or_else(|| current.to_share.iter().map(|s| s.id).collect());
        let to_learn = req
            .skills_to_learn
            .unwrap_or_else(|| current.to_learn.iter().map(|s| s.id).collect());

        validate_skill_ids(&state, &to_share).await?;
        validate_skill_ids(&state, &to_learn).await?;

        state.users.set_skills(user.id, &to_share, &to_learn).await?;
    }

    let skills = state.users.skills_of(user.id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from_parts(user, skills)))
}

/// DELETE /api/users/{id} - Protected, self only
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if id != identity.user_id {
        return Err(AppError::Forbidden(
            "Not authorized to delete this profile".to_string(),
        ));
    }

    state.users.delete(id).await?;
    tracing::info!(user_id = %id, "User account deleted");

    Ok(HttpResponse::Ok().json(DeletedResponse {
        message: "User deleted successfully".to_string(),
    }))
}

async fn validate_skill_ids(state: &AppState, ids: &[Uuid]) -> AppResult<()> {
    let distinct: std::collections::HashSet<Uuid> = ids.iter().copied().collect();
    let found = state.skills.find_by_ids(ids).await?;
    if found.len() != distinct.len() {
        return Err(AppError::BadRequest("Unknown skill id".to_string()));
    }
    Ok(())
}
