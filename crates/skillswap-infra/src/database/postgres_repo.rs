//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use skillswap_core::domain::{Message, Post, Skill, User, UserSkills};
use skillswap_core::error::RepoError;
use skillswap_core::ports::{MessageRepository, PostRepository, SkillRepository, UserRepository};

use super::entity::message::{self, Entity as MessageEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_like::{self, Entity as PostLikeEntity};
use super::entity::skill::{self, Entity as SkillEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::entity::user_skill::{self, Entity as UserSkillEntity, KIND_LEARN, KIND_SHARE};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL message repository.
pub type PostgresMessageRepository = PostgresBaseRepository<MessageEntity>;

/// PostgreSQL skill repository.
pub type PostgresSkillRepository = PostgresBaseRepository<SkillEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn skills_of(&self, user_id: Uuid) -> Result<UserSkills, RepoError> {
        let refs = UserSkillEntity::find()
            .filter(user_skill::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        if refs.is_empty() {
            return Ok(UserSkills::default());
        }

        let skill_ids: Vec<Uuid> = refs.iter().map(|r| r.skill_id).collect();
        let skills: HashMap<Uuid, Skill> = SkillEntity::find()
            .filter(skill::Column::Id.is_in(skill_ids))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let mut out = UserSkills::default();
        for r in refs {
            let Some(skill) = skills.get(&r.skill_id) else {
                continue;
            };
            match r.kind.as_str() {
                KIND_SHARE => out.to_share.push(skill.clone()),
                KIND_LEARN => out.to_learn.push(skill.clone()),
                other => tracing::warn!(kind = %other, "Unknown user_skills kind"),
            }
        }

        Ok(out)
    }

    async fn set_skills(
        &self,
        user_id: Uuid,
        to_share: &[Uuid],
        to_learn: &[Uuid],
    ) -> Result<(), RepoError> {
        UserSkillEntity::delete_many()
            .filter(user_skill::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        let rows: Vec<user_skill::ActiveModel> = to_share
            .iter()
            .map(|skill_id| (skill_id, KIND_SHARE))
            .chain(to_learn.iter().map(|skill_id| (skill_id, KIND_LEARN)))
            .map(|(skill_id, kind)| user_skill::ActiveModel {
                user_id: Set(user_id),
                skill_id: Set(*skill_id),
                kind: Set(kind.to_string()),
            })
            .collect();

        UserSkillEntity::insert_many(rows)
            .on_empty_do_nothing()
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn likes_of(&self, post_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let result = PostLikeEntity::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .order_by_asc(post_like::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(|m| m.user_id).collect())
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        // Atomic flip: try to remove the row; if nothing was there, insert
        // it. Never a fetch-modify-save of the whole set.
        let deleted = PostLikeEntity::delete_by_id((post_id, user_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if deleted.rows_affected == 0 {
            let like = post_like::ActiveModel {
                post_id: Set(post_id),
                user_id: Set(user_id),
                created_at: Set(Utc::now().into()),
            };

            PostLikeEntity::insert(like)
                .on_conflict(
                    OnConflict::columns([post_like::Column::PostId, post_like::Column::UserId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .map_err(map_db_err)?;
        }

        self.likes_of(post_id).await
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn append(&self, message: Message) -> Result<Message, RepoError> {
        let active: message::ActiveModel = message.into();
        let model = MessageEntity::insert(active)
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn list_between(&self, user_a: Uuid, user_b: Uuid) -> Result<Vec<Message>, RepoError> {
        let between = Condition::any()
            .add(
                Condition::all()
                    .add(message::Column::SenderId.eq(user_a))
                    .add(message::Column::ReceiverId.eq(user_b)),
            )
            .add(
                Condition::all()
                    .add(message::Column::SenderId.eq(user_b))
                    .add(message::Column::ReceiverId.eq(user_a)),
            );

        let result = MessageEntity::find()
            .filter(between)
            .order_by_asc(message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Message>, RepoError> {
        let involved = Condition::any()
            .add(message::Column::SenderId.eq(user_id))
            .add(message::Column::ReceiverId.eq(user_id));

        let result = MessageEntity::find()
            .filter(involved)
            .order_by_desc(message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn mark_read(&self, receiver_id: Uuid, sender_id: Uuid) -> Result<u64, RepoError> {
        let result = MessageEntity::update_many()
            .col_expr(message::Column::Read, Expr::value(true))
            .filter(message::Column::SenderId.eq(sender_id))
            .filter(message::Column::ReceiverId.eq(receiver_id))
            .filter(message::Column::Read.eq(false))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl SkillRepository for PostgresSkillRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, RepoError> {
        let result = SkillEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>, RepoError> {
        let result = SkillEntity::find()
            .filter(skill::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Skill>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = SkillEntity::find()
            .filter(skill::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_all(&self) -> Result<Vec<Skill>, RepoError> {
        let result = SkillEntity::find()
            .order_by_asc(skill::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, skill_item: Skill) -> Result<Skill, RepoError> {
        let active: skill::ActiveModel = skill_item.into();
        let model = SkillEntity::insert(active)
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }
}
