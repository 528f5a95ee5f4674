//! Skill catalog handlers.

use actix_web::{HttpResponse, web};

use skillswap_core::domain::Skill;
use skillswap_shared::dto::{CreateSkillRequest, SkillResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/skills
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let skills = state.skills.find_all().await?;
    let responses: Vec<SkillResponse> = skills.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// POST /api/skills - Protected
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CreateSkillRequest>,
) -> AppResult<HttpResponse> {
    let name = body.into_inner().name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    if state.skills.find_by_name(&name).await?.is_some() {
        return Err(AppError::Conflict("Skill already exists".to_string()));
    }

    let skill = state.skills.insert(Skill::new(name)).await?;
    tracing::info!(skill_id = %skill.id, "Skill created");

    Ok(HttpResponse::Created().json(SkillResponse::from(skill)))
}
