use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use pulse_service::auth::AuthState;
use pulse_service::handlers;
use pulse_service::jobs::start_story_cleaner;
use pulse_service::Config;
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pulse Service
///
/// Serves the story, post, comment, and search endpoints over PostgreSQL.
/// Token issuance and user management live in the auth collaborator; this
/// service only validates bearer tokens.
///
/// # Routes
///
/// - `/stories/*` - Ephemeral stories: list, grouped list, upload, view
///   marking, expiry cleanup
/// - `/posts/*` - Feed, post creation, likes, comments, reposts, search,
///   trending
/// - `/health` - Liveness plus database ping

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting pulse-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::error!("Migration failed: {}", e);
        eprintln!("ERROR: Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Connected to database, migrations applied");

    let auth_state = web::Data::new(AuthState::new(&config.auth.jwt_secret));

    // Periodic expiry sweep alongside the on-demand cleanup endpoint
    let cleaner_pool = db_pool.clone();
    let cleanup_interval = Duration::from_secs(config.cleanup.interval_secs);
    tokio::spawn(async move {
        start_story_cleaner(cleaner_pool, cleanup_interval).await;
    });

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(auth_state.clone())
            // Base64 image payloads need headroom over the default body cap
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(handlers::health))
            .service(
                web::scope("/stories")
                    .route("", web::get().to(handlers::list_stories))
                    .route("", web::post().to(handlers::create_story))
                    .route("/groups", web::get().to(handlers::story_groups))
                    .route("/cleanup", web::delete().to(handlers::cleanup_stories))
                    .route(
                        "/{story_id}/view",
                        web::post().to(handlers::mark_story_viewed),
                    ),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(handlers::get_feed))
                    .route("", web::post().to(handlers::create_post))
                    .route("/search", web::get().to(handlers::search_posts))
                    .route("/trending", web::get().to(handlers::trending_hashtags))
                    .route("/{post_id}/like", web::post().to(handlers::toggle_like))
                    .route(
                        "/{post_id}/comments",
                        web::get().to(handlers::list_comments),
                    )
                    .route(
                        "/{post_id}/comments",
                        web::post().to(handlers::add_comment),
                    )
                    .route("/{post_id}/repost", web::post().to(handlers::repost_post)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
