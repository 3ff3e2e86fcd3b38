//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod users;
mod views;


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
                    .route("/me", web::get().to(auth::me))
                    .route("/me", web::put().to(auth::update_me)),
            )
            // Profiles and the follow graph
            .service(
                web::scope("/users")
                    .route("/{username}", web::get().to(users::get_user))
                    .route("/{username}/posts", web::get().to(users::user_posts))
                    .route("/{username}/followers", web::get().to(users::followers))
                    .route("/{username}/followed", web::get().to(users::followed))
                    .route("/{username}/follow", web::post().to(users::follow))
                    .route("/{username}/follow", web::delete().to(users::unfollow)),
            )
            // Posts and timelines
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("/timeline", web::get().to(posts::timeline))
                    .route("/explore", web::get().to(posts::explore)),
            ),
    );
}
