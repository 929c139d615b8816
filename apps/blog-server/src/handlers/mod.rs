//! HTTP handlers and route configuration.

mod post;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(post::list)))
        .service(web::resource("/post/{pk}/").route(web::get().to(post::detail)))
        .service(web::resource("/{pk}/delete/").route(web::post().to(post::delete)))
        .service(
            web::resource("/add/")
                .route(web::get().to(post::add_form))
                .route(web::post().to(post::add)),
        )
        .service(
            web::resource("/{pk}/edit")
                .route(web::get().to(post::edit_form))
                .route(web::post().to(post::edit)),
        );
}
