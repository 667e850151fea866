use actix_session::config::PersistentSession;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{time, Key};
use actix_web::{web, App, HttpServer};

use hungry_paws::api::state::AppState;
use hungry_paws::infrastructure::database::mongo_context::MongoContext;
use hungry_paws::routes::{
    admin_routes, json_config, page_routes, public_routes, query_config, user_routes,
};
use hungry_paws::utils::auth::AuthUtils;
use hungry_paws::utils::config::AppConfig;

fn session_middleware(secret: &str) -> SessionMiddleware<CookieSessionStore> {
    let key = Key::from(&AuthUtils::session_key_material(secret));

    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_string())
        .cookie_http_only(true)
        .cookie_secure(false)
        .session_lifecycle(PersistentSession::default().session_ttl(time::Duration::days(1)))
        .build()
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::global();

    let mongo_context = match MongoContext::init(&config.database_url, &config.database_name).await
    {
        Ok(context) => context,
        Err(e) => {
            log::error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    println!("🚀 Server running at http://localhost:{}", config.port);

    let mongo_data = web::Data::new(mongo_context);
    let app_state = AppState { db: mongo_data };

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(json_config())
            .app_data(query_config())
            .wrap(session_middleware(&config.session_secret))
            .configure(public_routes)
            .configure(admin_routes)
            .configure(user_routes)
            .configure(page_routes)
    })
    .bind(("127.0.0.1", config.port))?
    .run()
    .await
}
