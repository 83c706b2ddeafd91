use axum::{Json, Router, extract::State, routing::post};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    AppState,
    error::ServiceError,
    routes::appointment,
    services::{auth_service, otp_service},
};

// Observed reset-code lifetimes: the forgot-password mail gives 10 minutes,
// the standalone generate endpoint 5.
const FORGOT_OTP_TTL_MINUTES: i64 = 10;
const GENERATE_OTP_TTL_MINUTES: i64 = 5;

#[derive(Deserialize, ToSchema)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct EmailBody {
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ConfirmOtpBody {
    pub email: String,
    pub otp: String,
}

#[derive(Deserialize, ToSchema)]
pub struct VerifyOtpBody {
    pub email: String,
    pub otp: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

#[utoipa::path(
    post,
    tags = ["Admin"],
    description = "Register the admin account",
    path = "/register",
    request_body(content = CredentialsBody, content_type = "application/json"),
    responses(
        (status = 200, description = "Admin registered successfully", body = MessageResponse),
        (status = 409, description = "Admin already exists"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<MessageResponse>, ServiceError> {
    auth_service::register(&state.db, &state.hasher, &body.email, &body.password).await?;
    Ok(MessageResponse::ok("Admin registered successfully"))
}

#[utoipa::path(
    post,
    tags = ["Admin"],
    description = "Log in and receive a 7-day bearer token",
    path = "/login",
    request_body(content = CredentialsBody, content_type = "application/json"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<TokenResponse>, ServiceError> {
    let token = auth_service::login(
        &state.db,
        &state.hasher,
        &state.signer,
        &body.email,
        &body.password,
    )
    .await?;

    Ok(Json(TokenResponse {
        success: true,
        token,
    }))
}

async fn send_otp(state: &AppState, email: &str, ttl_minutes: i64) -> Result<(), ServiceError> {
    let code = otp_service::generate(&state.db, email, Duration::minutes(ttl_minutes)).await?;

    let subject = "Admin Password Reset OTP";
    let content = format!(
        "Your OTP is {code}.\n\nThis code will expire in {ttl_minutes} minutes."
    );
    state.mailer.send(email, subject, content).await?;

    Ok(())
}

#[utoipa::path(
    post,
    tags = ["Admin"],
    description = "Email a 10-minute reset code to the admin",
    path = "/forgot-password",
    request_body(content = EmailBody, content_type = "application/json"),
    responses(
        (status = 200, description = "OTP sent", body = MessageResponse),
        (status = 404, description = "Admin not found"),
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<EmailBody>,
) -> Result<Json<MessageResponse>, ServiceError> {
    send_otp(&state, &body.email, FORGOT_OTP_TTL_MINUTES).await?;
    Ok(MessageResponse::ok("OTP sent!"))
}

#[utoipa::path(
    post,
    tags = ["Admin"],
    description = "Email a 5-minute reset code to the admin",
    path = "/generate-otp",
    request_body(content = EmailBody, content_type = "application/json"),
    responses(
        (status = 200, description = "OTP sent", body = MessageResponse),
        (status = 404, description = "Admin not found"),
    )
)]
pub async fn generate_otp(
    State(state): State<AppState>,
    Json(body): Json<EmailBody>,
) -> Result<Json<MessageResponse>, ServiceError> {
    send_otp(&state, &body.email, GENERATE_OTP_TTL_MINUTES).await?;
    Ok(MessageResponse::ok("OTP sent!"))
}

#[utoipa::path(
    post,
    tags = ["Admin"],
    description = "Check the emailed code without changing the password; a correct code is consumed",
    path = "/confirm-otp",
    request_body(content = ConfirmOtpBody, content_type = "application/json"),
    responses(
        (status = 200, description = "OTP verified", body = MessageResponse),
        (status = 400, description = "Missing, expired or wrong OTP"),
        (status = 404, description = "Admin not found"),
    )
)]
pub async fn confirm_otp(
    State(state): State<AppState>,
    Json(body): Json<ConfirmOtpBody>,
) -> Result<Json<MessageResponse>, ServiceError> {
    otp_service::verify(&state.db, &body.email, &body.otp).await?;
    Ok(MessageResponse::ok("OTP Verified"))
}

#[utoipa::path(
    post,
    tags = ["Admin"],
    description = "Verify the emailed code and set a new password",
    path = "/verify-otp",
    request_body(content = VerifyOtpBody, content_type = "application/json"),
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Missing, expired or wrong OTP"),
        (status = 404, description = "Admin not found"),
    )
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpBody>,
) -> Result<Json<MessageResponse>, ServiceError> {
    otp_service::reset_password(
        &state.db,
        &state.hasher,
        &body.email,
        &body.otp,
        &body.new_password,
    )
    .await?;

    Ok(MessageResponse::ok("Password updated!"))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/generate-otp", post(generate_otp))
        .route("/confirm-otp", post(confirm_otp))
        .route("/verify-otp", post(verify_otp))
        .nest("/appointments", appointment::admin_router())
}
