use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use skillswap_core::domain::{Message, Post};
use skillswap_core::ports::{BaseRepository, MessageRepository, UserRepository};

use super::entity::{message, post, user};
use super::{PostgresMessageRepository, PostgresPostRepository, PostgresUserRepository};

#[tokio::test]
async fn find_post_by_id_maps_model_to_domain() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let skill_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            author_id,
            skill_id,
            title: "Sourdough basics".to_owned(),
            content: "Starter care and folding".to_owned(),
            images: serde_json::json!(["/uploads/a.jpg"]),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let found = result.unwrap();
    assert_eq!(found.title, "Sourdough basics");
    assert_eq!(found.author_id, author_id);
    assert_eq!(found.images, vec!["/uploads/a.jpg".to_string()]);
}

#[tokio::test]
async fn find_user_by_email_maps_model_to_domain() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            email: "mia@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            name: "Mia".to_owned(),
            image: None,
            bio: None,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found = repo.find_by_email("mia@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, user_id);
    assert_eq!(found.name, "Mia");
}

#[tokio::test]
async fn list_between_maps_rows_in_query_order() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let now = Utc::now();

    let row = |content: &str, minutes_ago: i64| message::Model {
        id: Uuid::new_v4(),
        sender_id: a,
        receiver_id: b,
        content: content.to_owned(),
        read: false,
        created_at: (now - Duration::minutes(minutes_ago)).into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row("first", 10), row("second", 5)]])
        .into_connection();

    let repo = PostgresMessageRepository::new(db);

    let messages: Vec<Message> = repo.list_between(a, b).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "first");
    assert_eq!(messages[1].content, "second");
}
