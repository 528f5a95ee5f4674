//! Handler tests against the in-memory repositories.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::TimeDelta;
use serde_json::{Value, json};
use uuid::Uuid;

use skillswap_core::domain::{Message, Post, Skill, User};
use skillswap_core::ports::{PasswordService, TokenService};
use skillswap_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use crate::handlers::configure_routes;
use crate::realtime::{self, RealtimeGateway};
use crate::state::AppState;

struct TestCtx {
    state: AppState,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
    gateway: RealtimeGateway,
}

fn ctx() -> TestCtx {
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        expiration_hours: 1,
        issuer: "test-issuer".to_string(),
    }));
    TestCtx {
        state: AppState::in_memory(),
        gateway: realtime::detached(tokens.clone()),
        passwords: Arc::new(Argon2PasswordService::new()),
        tokens,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.state.clone()))
                .app_data(web::Data::new($ctx.tokens.clone()))
                .app_data(web::Data::new($ctx.passwords.clone()))
                .app_data(web::Data::new($ctx.gateway.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn seed_user(ctx: &TestCtx, email: &str, name: &str) -> (Uuid, String) {
    let hash = ctx.passwords.hash("password123").unwrap();
    let user = ctx
        .state
        .users
        .insert(User::new(email.to_string(), hash, name.to_string()))
        .await
        .unwrap();
    let token = ctx.tokens.generate_token(user.id, email).unwrap();
    (user.id, token)
}

async fn seed_skill(ctx: &TestCtx, name: &str) -> Uuid {
    ctx.state
        .skills
        .insert(Skill::new(name.to_string()))
        .await
        .unwrap()
        .id
}

async fn seed_post(ctx: &TestCtx, author_id: Uuid, skill_id: Uuid) -> Uuid {
    ctx.state
        .posts
        .insert(Post::new(
            author_id,
            skill_id,
            "Open chords first".to_string(),
            "Start with E and A shapes.".to_string(),
        ))
        .await
        .unwrap()
        .id
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn health_reports_ok() {
    let ctx = ctx();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["realtime_clients"], 0);
}

#[actix_web::test]
async fn register_login_me_flow() {
    let ctx = ctx();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "mia@example.com",
            "password": "password123",
            "name": "Mia"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["access_token"].as_str().is_some());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "mia@example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "mia@example.com");
    assert_eq!(body["name"], "Mia");
    assert!(body["password"].is_null());
}

#[actix_web::test]
async fn register_rejects_duplicate_email() {
    let ctx = ctx();
    seed_user(&ctx, "mia@example.com", "Mia").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "mia@example.com",
            "password": "password123",
            "name": "Other Mia"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Email already registered");
}

#[actix_web::test]
async fn register_rejects_short_password() {
    let ctx = ctx();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "mia@example.com", "password": "short", "name": "Mia" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn protected_routes_require_bearer_token() {
    let ctx = ctx();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/messages/conversations")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[actix_web::test]
async fn send_message_rejects_empty_content() {
    let ctx = ctx();
    let (_u1, token) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let (u2, _) = seed_user(&ctx, "leo@example.com", "Leo").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/messages")
        .insert_header(bearer(&token))
        .set_json(json!({ "receiverId": u2, "content": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "content is required");
}

#[actix_web::test]
async fn send_message_names_missing_receiver() {
    let ctx = ctx();
    let (_u1, token) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/messages")
        .insert_header(bearer(&token))
        .set_json(json!({ "content": "hello" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "receiverId is required");
}

#[actix_web::test]
async fn message_list_requires_recipient_id() {
    let ctx = ctx();
    let (_u1, token) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/messages")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "recipientId is required");
}

#[actix_web::test]
async fn message_thread_and_mark_read_round_trip() {
    let ctx = ctx();
    let (u1, token1) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let (u2, token2) = seed_user(&ctx, "leo@example.com", "Leo").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/messages")
        .insert_header(bearer(&token1))
        .set_json(json!({ "receiverId": u2, "content": "hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/messages?recipientId={u2}"))
        .insert_header(bearer(&token1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let thread = body.as_array().unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0]["content"], "hi");
    assert_eq!(thread[0]["read"], false);
    assert_eq!(thread[0]["sender"]["name"], "Mia");

    let req = test::TestRequest::post()
        .uri("/api/messages/read")
        .insert_header(bearer(&token2))
        .set_json(json!({ "senderId": u1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["updated"], 1);
}

#[actix_web::test]
async fn conversations_keep_latest_message_per_counterparty() {
    let ctx = ctx();
    let (u1, token1) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let (u2, _) = seed_user(&ctx, "leo@example.com", "Leo").await;
    let (u3, _) = seed_user(&ctx, "zoe@example.com", "Zoe").await;

    // Seed with explicit timestamps so the ordering is unambiguous.
    let base = chrono::Utc::now();
    for (sender, receiver, content, offset) in [
        (u1, u2, "first to leo", 0),
        (u1, u3, "to zoe", 1),
        (u2, u1, "leo replies", 2),
    ] {
        let mut message = Message::new(sender, receiver, content.to_string());
        message.created_at = base + TimeDelta::seconds(offset);
        ctx.state.messages.append(message).await.unwrap();
    }
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/messages/conversations")
        .insert_header(bearer(&token1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let conversations = body.as_array().unwrap();

    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0]["user"]["name"], "Leo");
    assert_eq!(conversations[0]["lastMessage"]["content"], "leo replies");
    assert_eq!(conversations[1]["user"]["name"], "Zoe");
}

#[actix_web::test]
async fn like_toggle_adds_then_removes() {
    let ctx = ctx();
    let (u1, _) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let (u2, token2) = seed_user(&ctx, "leo@example.com", "Leo").await;
    let skill = seed_skill(&ctx, "Guitar").await;
    let post = seed_post(&ctx, u1, skill).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post}/like"))
        .insert_header(bearer(&token2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["likes"], json!([u2]));

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post}/like"))
        .insert_header(bearer(&token2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["likes"], json!([]));
}

#[actix_web::test]
async fn like_of_unknown_post_is_a_404() {
    let ctx = ctx();
    let (_u1, token) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/like", Uuid::new_v4()))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Post not found");
}

#[actix_web::test]
async fn only_the_author_may_delete_a_post() {
    let ctx = ctx();
    let (u1, token1) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let (_u2, token2) = seed_user(&ctx, "leo@example.com", "Leo").await;
    let skill = seed_skill(&ctx, "Guitar").await;
    let post = seed_post(&ctx, u1, skill).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post}"))
        .insert_header(bearer(&token2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post}"))
        .insert_header(bearer(&token1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(ctx.state.posts.find_by_id(post).await.unwrap().is_none());
}

#[actix_web::test]
async fn profile_updates_are_self_only() {
    let ctx = ctx();
    let (_u1, token1) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let (u2, _) = seed_user(&ctx, "leo@example.com", "Leo").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{u2}"))
        .insert_header(bearer(&token1))
        .set_json(json!({ "name": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn profile_update_replaces_skill_sets() {
    let ctx = ctx();
    let (u1, token1) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let guitar = seed_skill(&ctx, "Guitar").await;
    let sketching = seed_skill(&ctx, "Sketching").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{u1}"))
        .insert_header(bearer(&token1))
        .set_json(json!({
            "bio": "Hi there",
            "skillsToShare": [guitar],
            "skillsToLearn": [sketching]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["bio"], "Hi there");
    assert_eq!(body["skillsToShare"][0]["name"], "Guitar");
    assert_eq!(body["skillsToLearn"][0]["name"], "Sketching");
}

fn multipart_body(fields: &[(&str, &str)], boundary: &str) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}

#[actix_web::test]
async fn post_create_accepts_multipart_fields() {
    let ctx = ctx();
    let (_u1, token) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let skill = seed_skill(&ctx, "Guitar").await;
    let app = init_app!(ctx);

    let boundary = "----handler-test-boundary";
    let skill_id = skill.to_string();
    let body = multipart_body(
        &[
            ("title", "Open chords first"),
            ("content", "Start with E and A shapes."),
            ("skillId", &skill_id),
        ],
        boundary,
    );

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Open chords first");
    assert_eq!(body["author"]["name"], "Mia");
    assert_eq!(body["skill"]["name"], "Guitar");
    assert_eq!(body["likes"], json!([]));
}

#[actix_web::test]
async fn post_create_names_the_missing_field() {
    let ctx = ctx();
    let (_u1, token) = seed_user(&ctx, "mia@example.com", "Mia").await;
    let app = init_app!(ctx);

    let boundary = "----handler-test-boundary";
    let body = multipart_body(&[("content", "No title here.")], boundary);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "title is required");
}
