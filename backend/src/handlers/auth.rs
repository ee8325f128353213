//! Authentication handlers: phone/OTP login

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::auth::{AuthTokens, OtpIssued};
use crate::services::AuthService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub otp: String,
}

/// POST /auth/send-otp
///
/// Issues a one-time code for the given phone number.
pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> AppResult<Json<OtpIssued>> {
    let service = AuthService::new(state.store.clone(), &state.config);
    let issued = service.send_otp(&payload.phone_number)?;
    Ok(Json(issued))
}

/// POST /auth/verify-otp
///
/// Verifies the code and returns an access token, creating the user
/// account on first login.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> AppResult<Json<AuthTokens>> {
    let service = AuthService::new(state.store.clone(), &state.config);
    let tokens = service.verify_otp(&payload.phone_number, &payload.otp)?;

    tracing::info!("User {} authenticated", tokens.user.id);

    Ok(Json(tokens))
}
