use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use skillswap_core::domain::{User, UserSkills};
use skillswap_core::error::RepoError;
use skillswap_core::ports::{BaseRepository, SkillRepository, UserRepository};

use super::InMemorySkillRepository;

/// In-memory user store.
///
/// Holds the skill store so that profile skill references can be resolved to
/// full `Skill` values, the way the Postgres repository joins through
/// `user_skills`.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
    skill_refs: RwLock<HashMap<Uuid, (Vec<Uuid>, Vec<Uuid>)>>,
    skills: Arc<InMemorySkillRepository>,
}

impl InMemoryUserRepository {
    pub fn new(skills: Arc<InMemorySkillRepository>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            skill_refs: RwLock::new(HashMap::new()),
            skills,
        }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint(format!(
                "email already registered: {}",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let removed = self.users.write().await.remove(&id);
        self.skill_refs.write().await.remove(&id);
        if removed.is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let mut all: Vec<User> = self.users.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn skills_of(&self, user_id: Uuid) -> Result<UserSkills, RepoError> {
        let refs = self.skill_refs.read().await;
        let Some((share_ids, learn_ids)) = refs.get(&user_id) else {
            return Ok(UserSkills::default());
        };

        Ok(UserSkills {
            to_share: self.skills.find_by_ids(share_ids).await?,
            to_learn: self.skills.find_by_ids(learn_ids).await?,
        })
    }

    async fn set_skills(
        &self,
        user_id: Uuid,
        to_share: &[Uuid],
        to_learn: &[Uuid],
    ) -> Result<(), RepoError> {
        self.skill_refs
            .write()
            .await
            .insert(user_id, (to_share.to_vec(), to_learn.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use skillswap_core::domain::Skill;

    use super::*;

    fn sample_user(email: &str) -> User {
        User::new(email.to_string(), "hash".to_string(), "Sam".to_string())
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new(Arc::new(InMemorySkillRepository::new()));
        repo.insert(sample_user("a@b.c")).await.unwrap();

        let result = repo.insert(sample_user("a@b.c")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn skills_round_trip_through_refs() {
        let skills = Arc::new(InMemorySkillRepository::new());
        let knitting = skills.insert(Skill::new("knitting".to_string())).await.unwrap();
        let rust = skills.insert(Skill::new("rust".to_string())).await.unwrap();

        let repo = InMemoryUserRepository::new(skills);
        let user = repo.insert(sample_user("a@b.c")).await.unwrap();

        repo.set_skills(user.id, &[knitting.id], &[rust.id])
            .await
            .unwrap();

        let got = repo.skills_of(user.id).await.unwrap();
        assert_eq!(got.to_share, vec![knitting]);
        assert_eq!(got.to_learn, vec![rust]);
    }

    #[tokio::test]
    async fn delete_of_unknown_user_is_not_found() {
        let repo = InMemoryUserRepository::new(Arc::new(InMemorySkillRepository::new()));
        let result = repo.delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
