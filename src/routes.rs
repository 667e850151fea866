use actix_web::web;

use crate::api::handlers::auth_handlers::{log_in, log_out, sign_up};
use crate::api::handlers::booking_handlers::{
    admin_list_bookings, approve_booking, create_booking, delete_booking, list_bookings,
    reject_booking,
};
use crate::api::handlers::page_handlers::{admin_page, index, user_page};
use crate::api::handlers::pet_handlers::{add_pet, delete_pet, list_pets, update_pet};
use crate::utils::errors::ApiError;
use crate::utils::guard::SessionGuard;

/// Malformed JSON bodies and query strings answer with the same
/// `{"success": false, ...}` body as every other validation failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/signup").route(web::post().to(sign_up)));

    cfg.service(web::resource("/api/login").route(web::post().to(log_in)));

    // Logout destroys whatever session exists, logged in or not.
    cfg.service(web::resource("/logout").route(web::post().to(log_out)));
}

/// Registered before `user_routes` so the longer `/api/admin` prefix is not
/// swallowed by the general `/api` scope.
pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(SessionGuard::admin())
            .service(web::resource("/bookings").route(web::get().to(admin_list_bookings)))
            .service(
                web::resource("/bookings/{id}/approve").route(web::post().to(approve_booking)),
            )
            .service(web::resource("/bookings/{id}/reject").route(web::post().to(reject_booking))),
    );
}

pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(SessionGuard::user())
            .service(
                web::resource("/pets")
                    .route(web::get().to(list_pets))
                    .route(web::post().to(add_pet)),
            )
            .service(
                web::resource("/pets/{id}")
                    .route(web::put().to(update_pet))
                    .route(web::delete().to(delete_pet)),
            )
            .service(
                web::resource("/bookings")
                    .route(web::get().to(list_bookings))
                    .route(web::post().to(create_booking)),
            )
            .service(web::resource("/bookings/{id}").route(web::delete().to(delete_booking))),
    );
}

pub fn page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)));

    cfg.service(
        web::resource("/user")
            .wrap(SessionGuard::user().or_redirect("/"))
            .route(web::get().to(user_page)),
    );

    cfg.service(
        web::resource("/admin")
            .wrap(SessionGuard::admin().or_redirect("/"))
            .route(web::get().to(admin_page)),
    );
}
