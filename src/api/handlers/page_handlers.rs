use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder};

use crate::domain::user::model::SessionUser;
use crate::utils::session::Principal;

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Minimal server-rendered dashboard shell; the sidebar scripts fill in the
/// rest from the JSON API.
fn dashboard_page(title: &str, user: &SessionUser) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title} | Hungry Paws</title></head>\n\
         <body>\n\
         <h1>Welcome, {name} \u{1F43E}</h1>\n\
         <main id=\"dashboardContent\" data-email=\"{email}\"></main>\n\
         </body>\n\
         </html>\n",
        title = title,
        name = escape_html(&user.full_name),
        email = escape_html(&user.email),
    )
}

pub async fn index() -> impl Responder {
    "This is the Hungry Paws booking service. Sign up at /api/signup or log in at /api/login."
}

pub async fn user_page(principal: Principal) -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(dashboard_page("My Dashboard", &principal.0))
}

pub async fn admin_page(principal: Principal) -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(dashboard_page("Admin Dashboard", &principal.0))
}
