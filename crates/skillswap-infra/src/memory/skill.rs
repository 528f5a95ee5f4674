use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use skillswap_core::domain::Skill;
use skillswap_core::error::RepoError;
use skillswap_core::ports::SkillRepository;

/// In-memory skill store.
#[derive(Default)]
pub struct InMemorySkillRepository {
    skills: RwLock<HashMap<Uuid, Skill>>,
}

impl InMemorySkillRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, RepoError> {
        Ok(self.skills.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>, RepoError> {
        Ok(self
            .skills
            .read()
            .await
            .values()
            .find(|s| s.name == name)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Skill>, RepoError> {
        let skills = self.skills.read().await;
        Ok(ids.iter().filter_map(|id| skills.get(id).cloned()).collect())
    }

    async fn find_all(&self) -> Result<Vec<Skill>, RepoError> {
        let mut all: Vec<Skill> = self.skills.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn insert(&self, skill: Skill) -> Result<Skill, RepoError> {
        let mut skills = self.skills.write().await;
        if skills.values().any(|s| s.name == skill.name) {
            return Err(RepoError::Constraint(format!(
                "skill name already exists: {}",
                skill.name
            )));
        }
        skills.insert(skill.id, skill.clone());
        Ok(skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_duplicate_name() {
        let repo = InMemorySkillRepository::new();
        repo.insert(Skill::new("welding".to_string())).await.unwrap();

        let result = repo.insert(Skill::new("welding".to_string())).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn lists_sorted_by_name() {
        let repo = InMemorySkillRepository::new();
        repo.insert(Skill::new("pottery".to_string())).await.unwrap();
        repo.insert(Skill::new("baking".to_string())).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["baking", "pottery"]);
    }
}
