//! Authentication service: phone/OTP login and token management

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use shared::models::{OtpCode, User};
use shared::validation::{normalize_phone_number, validate_otp_code, validate_phone_number};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::storage::MemoryStore;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<MemoryStore>,
    jwt_secret: String,
    token_expiry: i64,
    otp_expiry_minutes: i64,
    development: bool,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub phone: String,
    pub exp: i64,
    pub iat: i64,
}

/// Result of issuing an OTP
#[derive(Debug, Serialize)]
pub struct OtpIssued {
    pub message: String,
    pub expires_at: DateTime<Utc>,
    /// Echoed only in the development environment, where no SMS gateway
    /// is wired up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// Result of a successful OTP verification
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AuthenticatedUser,
}

#[derive(Debug, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub phone_number: String,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(store: Arc<MemoryStore>, config: &Config) -> Self {
        Self {
            store,
            jwt_secret: config.auth.jwt_secret.clone(),
            token_expiry: config.auth.token_expiry,
            otp_expiry_minutes: config.auth.otp_expiry_minutes,
            development: config.is_development(),
        }
    }

    /// Generate and store an OTP for a phone number.
    ///
    /// TODO: deliver via an SMS gateway; until then the code is logged and,
    /// in development, echoed in the response.
    pub fn send_otp(&self, phone_number: &str) -> AppResult<OtpIssued> {
        validate_phone_number(phone_number).map_err(|msg| AppError::Validation {
            field: "phone_number".to_string(),
            message: msg.to_string(),
        })?;
        let phone = normalize_phone_number(phone_number);

        // Expired codes never verify; dropping them here just keeps the map small
        self.store.purge_expired_otps()?;

        let code = generate_otp_code();
        let expires_at = Utc::now() + Duration::minutes(self.otp_expiry_minutes);

        self.store.save_otp(OtpCode {
            id: Uuid::new_v4(),
            phone_number: phone.clone(),
            code_hash: hash_otp_code(&code),
            expires_at,
            created_at: Utc::now(),
        })?;

        tracing::info!("OTP issued for {}: {}", phone, code);

        Ok(OtpIssued {
            message: "OTP sent successfully".to_string(),
            expires_at,
            otp: self.development.then_some(code),
        })
    }

    /// Verify an OTP, creating the user on first login, and issue a token
    pub fn verify_otp(&self, phone_number: &str, code: &str) -> AppResult<AuthTokens> {
        validate_otp_code(code).map_err(|msg| AppError::Validation {
            field: "otp".to_string(),
            message: msg.to_string(),
        })?;
        let phone = normalize_phone_number(phone_number);

        // Single use: the matching code is removed on success
        self.store
            .take_valid_otp(&phone, &hash_otp_code(code))?
            .ok_or(AppError::InvalidOtp)?;

        let user = match self.store.get_user_by_phone(&phone)? {
            Some(user) => user,
            None => self.store.create_user(phone.clone())?,
        };

        let access_token = self.generate_token(&user)?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_expiry,
            user: AuthenticatedUser {
                id: user.id,
                phone_number: user.phone_number,
            },
        })
    }

    /// Validate an access token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// Generate an access token for a user
    fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            phone: user.phone_number.clone(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }
}

/// Generate a random 6-digit OTP
fn generate_otp_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    n.to_string()
}

/// Hash an OTP code for storage
pub fn hash_otp_code(code: &str) -> String {
    let digest = Sha256::digest(code.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_otp_is_six_digits() {
        for _ in 0..100 {
            let code = generate_otp_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));
        }
    }

    #[test]
    fn test_otp_hash_is_deterministic() {
        assert_eq!(hash_otp_code("123456"), hash_otp_code("123456"));
        assert_ne!(hash_otp_code("123456"), hash_otp_code("654321"));
    }

    fn dev_service() -> AuthService {
        AuthService {
            store: Arc::new(MemoryStore::new()),
            jwt_secret: "test-secret".to_string(),
            token_expiry: 3600,
            otp_expiry_minutes: 10,
            development: true,
        }
    }

    #[test]
    fn test_send_and_verify_otp_flow() {
        let service = dev_service();

        let issued = service.send_otp("0812345678").unwrap();
        let code = issued.otp.expect("dev mode echoes the code");

        let tokens = service.verify_otp("0812345678", &code).unwrap();
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.user.phone_number, "0812345678");

        // Token round-trips through validation
        let claims = service.validate_token(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, tokens.user.id.to_string());
        assert_eq!(claims.phone, "0812345678");
    }

    #[test]
    fn test_verify_rejects_wrong_code() {
        let service = dev_service();
        let issued = service.send_otp("0812345678").unwrap();
        let code = issued.otp.unwrap();
        let wrong = if code == "999999" { "111111" } else { "999999" };

        assert!(matches!(
            service.verify_otp("0812345678", wrong),
            Err(AppError::InvalidOtp)
        ));
        // The right code still works afterwards
        assert!(service.verify_otp("0812345678", &code).is_ok());
    }

    #[test]
    fn test_verify_is_single_use() {
        let service = dev_service();
        let code = service.send_otp("0812345678").unwrap().otp.unwrap();

        assert!(service.verify_otp("0812345678", &code).is_ok());
        assert!(matches!(
            service.verify_otp("0812345678", &code),
            Err(AppError::InvalidOtp)
        ));
    }

    #[test]
    fn test_repeat_login_reuses_account() {
        let service = dev_service();

        let code = service.send_otp("0812345678").unwrap().otp.unwrap();
        let first = service.verify_otp("0812345678", &code).unwrap();

        let code = service.send_otp("0812345678").unwrap().otp.unwrap();
        let second = service.verify_otp("0812345678", &code).unwrap();

        assert_eq!(first.user.id, second.user.id);
    }

    #[test]
    fn test_send_otp_rejects_bad_phone() {
        let service = dev_service();
        assert!(matches!(
            service.send_otp("12345"),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_token_rejects_garbage() {
        let service = dev_service();
        assert!(matches!(
            service.validate_token("not-a-jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
