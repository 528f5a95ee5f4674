use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Skill entity - referenced by users and posts, owned by neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

impl Skill {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}
