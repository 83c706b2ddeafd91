use std::{env, net::SocketAddr};

use axum::{Router, response::IntoResponse, routing::get};
use dotenv::dotenv;
use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

mod argon_hasher;
mod auth_token;
mod email_client;
mod entities;
mod error;
mod routes;
mod services;

#[cfg(test)]
mod argon_hasher_test;

use argon_hasher::{ArgonHasher, Config};
use auth_token::TokenSigner;
use email_client::EmailClient;

#[cfg(all(target_env = "musl", not(target_os = "macos")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

async fn root() -> impl IntoResponse {
    "Clinic appointment service"
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub hasher: ArgonHasher,
    pub mailer: EmailClient,
    pub signer: TokenSigner,
}

#[derive(OpenApi)]
#[openapi(paths(
    routes::appointment::create_appointment,
    routes::appointment::list_appointments,
    routes::appointment::delete_appointment,
    routes::admin::register,
    routes::admin::login,
    routes::admin::forgot_password,
    routes::admin::generate_otp,
    routes::admin::confirm_otp,
    routes::admin::verify_otp,
))]
struct ApiDoc;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing signing secret or connection string is fatal at startup
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let password_hashing_secret =
        env::var("PASSWORD_HASHING_SECRET").expect("PASSWORD_HASHING_SECRET must be set");

    let hasher = ArgonHasher::new(Config {
        iterations: 4,
        parallelism: 4,
        memory_cost: 512,
        secret_key: password_hashing_secret.as_bytes().to_vec(),
    })
    .expect("invalid argon2 configuration");

    let smtp_username = env::var("SMTP_USERNAME").expect("SMTP_USERNAME must be set");
    let mailer = EmailClient {
        smtp_server: env::var("SMTP_SERVER").expect("SMTP_SERVER must be set"),
        smtp_port: env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587),
        from: env::var("MAIL_FROM").unwrap_or_else(|_| smtp_username.clone()),
        username: smtp_username,
        password: env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD must be set"),
    };

    let signer = TokenSigner::new(&jwt_secret);

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        hasher,
        mailer,
        signer,
    };

    let app = Router::new()
        .route("/", get(root))
        .nest("/api/appointments", routes::appointment::public_router())
        .nest("/api/admin", routes::admin::admin_router())
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .with_state(state);

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::debug!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
