//! HTTP handlers and route configuration.

mod assets;
mod blogs;
mod form;
mod health;
mod pages;
mod public;
mod visitors;

#[cfg(test)]
mod tests;

use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed JSON bodies and query strings answer with the envelope too.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| error::Error::from(AppError::BadRequest(err.to_string()))),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| error::Error::from(AppError::BadRequest(err.to_string()))),
    );

    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(blogs::list))
                    .route("", web::post().to(blogs::create))
                    .route("/{id}", web::get().to(blogs::get))
                    .route("/{id}", web::put().to(blogs::update))
                    .route("/{id}", web::delete().to(blogs::delete))
                    .route("/{id}/publish", web::put().to(blogs::publish)),
            )
            .route("/public/blogs/{slug}", web::get().to(public::get_by_slug))
            .service(
                web::scope("/visitors")
                    .route("", web::get().to(visitors::list))
                    .route("/countries", web::get().to(visitors::countries))
                    .route("/stats", web::get().to(visitors::stats)),
            ),
    )
    .route("/blogs/{slug}", web::get().to(public::blog_page))
    .service(
        web::scope("/dashboard")
            .route("/blogs", web::get().to(pages::blogs))
            .route("/blogs/new", web::get().to(pages::new_blog))
            .route("/blogs/{id}/edit", web::get().to(pages::edit_blog))
            .route("/visitors", web::get().to(pages::visitors)),
    )
    .route("/static/{file}", web::get().to(assets::static_file));
}
