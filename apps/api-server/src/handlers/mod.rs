//! HTTP handlers and route configuration.

mod auth;
mod health;
mod messages;
mod posts;
mod skills;
mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("/{id}", web::get().to(users::get))
                    .route("/{id}", web::put().to(users::update))
                    .route("/{id}", web::delete().to(users::delete)),
            )
            .service(
                web::scope("/skills")
                    .route("", web::get().to(skills::list))
                    .route("", web::post().to(skills::create)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/like", web::post().to(posts::toggle_like)),
            )
            .service(
                web::scope("/messages")
                    .route("/conversations", web::get().to(messages::conversations))
                    .route("", web::get().to(messages::list))
                    .route("", web::post().to(messages::send))
                    .route("/read", web::post().to(messages::mark_read)),
            ),
    );
}
