//! In-memory storage for users, OTP codes and analysis history
//!
//! The platform keeps all state in process memory behind read-write locks.
//! Records are immutable once inserted; the only mutation is OTP removal on
//! successful verification.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use shared::models::{AnalysisRecord, OtpCode, User};

use crate::error::{AppError, AppResult};

/// Process-wide in-memory store
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    otp_codes: RwLock<HashMap<Uuid, OtpCode>>,
    analyses: RwLock<HashMap<Uuid, AnalysisRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a user by phone number
    pub fn get_user_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(lock_error)?;
        Ok(users
            .values()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    /// Create a new user account
    pub fn create_user(&self, phone_number: String) -> AppResult<User> {
        let user = User::new(phone_number);
        let mut users = self.users.write().map_err(lock_error)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Store a pending OTP
    pub fn save_otp(&self, otp: OtpCode) -> AppResult<()> {
        let mut codes = self.otp_codes.write().map_err(lock_error)?;
        codes.insert(otp.id, otp);
        Ok(())
    }

    /// Take a valid (unexpired, hash-matching) OTP for a phone number.
    ///
    /// The code is removed on success, making each OTP single use.
    pub fn take_valid_otp(&self, phone_number: &str, code_hash: &str) -> AppResult<Option<OtpCode>> {
        let now = Utc::now();
        let mut codes = self.otp_codes.write().map_err(lock_error)?;

        let found = codes
            .values()
            .find(|otp| {
                otp.phone_number == phone_number
                    && otp.code_hash == code_hash
                    && !otp.is_expired(now)
            })
            .map(|otp| otp.id);

        Ok(found.and_then(|id| codes.remove(&id)))
    }

    /// Drop expired OTP codes
    pub fn purge_expired_otps(&self) -> AppResult<usize> {
        let now = Utc::now();
        let mut codes = self.otp_codes.write().map_err(lock_error)?;
        let before = codes.len();
        codes.retain(|_, otp| !otp.is_expired(now));
        Ok(before - codes.len())
    }

    /// Persist a completed analysis
    pub fn save_analysis(&self, record: AnalysisRecord) -> AppResult<AnalysisRecord> {
        let mut analyses = self.analyses.write().map_err(lock_error)?;
        analyses.insert(record.id, record.clone());
        Ok(record)
    }

    /// Analyses belonging to a user, newest first
    pub fn get_analyses_by_user(&self, user_id: Uuid) -> AppResult<Vec<AnalysisRecord>> {
        let analyses = self.analyses.read().map_err(lock_error)?;
        let mut records: Vec<AnalysisRecord> = analyses
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Get a single analysis scoped to its owner
    pub fn get_analysis(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<AnalysisRecord>> {
        let analyses = self.analyses.read().map_err(lock_error)?;
        Ok(analyses
            .get(&id)
            .filter(|a| a.user_id == user_id)
            .cloned())
    }
}

fn lock_error<T>(_: std::sync::PoisonError<T>) -> AppError {
    AppError::Storage("storage lock poisoned".to_string())
}
