use chrono::{DateTime, Duration, FixedOffset, Utc};
use rand::Rng;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::Set,
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
};

use crate::{argon_hasher::ArgonHasher, entities::admin, error::ServiceError};

pub fn gen_otp_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Validates a supplied code against the pending one on an account.
///
/// Expiry is exclusive: a request at exactly the expiry instant still passes.
/// A mismatch is reported without touching the pending code, so retries stay
/// possible until expiry.
pub fn check_pending_otp(
    pending: Option<&str>,
    expires_at: Option<DateTime<FixedOffset>>,
    supplied: &str,
    now: DateTime<FixedOffset>,
) -> Result<(), ServiceError> {
    let (code, expires_at) = match (pending, expires_at) {
        (Some(code), Some(expires_at)) => (code, expires_at),
        _ => return Err(ServiceError::NoPendingOtp),
    };

    if now > expires_at {
        return Err(ServiceError::OtpExpired);
    }

    // Opaque string comparison, no numeric coercion
    if code != supplied {
        return Err(ServiceError::OtpMismatch);
    }

    Ok(())
}

/// Stores a fresh 6-digit code on the account, replacing any pending one,
/// and returns it so the caller can hand it to the mail collaborator. The
/// code is never exposed in an HTTP response.
pub async fn generate(
    db: &DatabaseConnection,
    email: &str,
    ttl: Duration,
) -> Result<String, ServiceError> {
    let account = admin::Entity::find()
        .filter(admin::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let code = gen_otp_code();
    let now = Utc::now().fixed_offset();

    let mut active = account.into_active_model();
    active.otp = Set(Some(code.clone()));
    active.otp_expires_at = Set(Some(now + ttl));
    active.updated_at = Set(now);
    active.update(db).await?;

    Ok(code)
}

/// Checks the supplied code and consumes it on success. Failures leave the
/// account untouched; only a correct code clears the pending state here.
pub async fn verify(
    db: &DatabaseConnection,
    email: &str,
    code: &str,
) -> Result<(), ServiceError> {
    let account = admin::Entity::find()
        .filter(admin::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let now = Utc::now().fixed_offset();
    check_pending_otp(account.otp.as_deref(), account.otp_expires_at, code, now)?;

    let mut active = account.into_active_model();
    active.otp = Set(None);
    active.otp_expires_at = Set(None);
    active.updated_at = Set(now);
    active.update(db).await?;

    Ok(())
}

/// Same validation as `verify`, but the password swap and the OTP clearing
/// land in one record update.
pub async fn reset_password(
    db: &DatabaseConnection,
    hasher: &ArgonHasher,
    email: &str,
    code: &str,
    new_password: &str,
) -> Result<(), ServiceError> {
    let account = admin::Entity::find()
        .filter(admin::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let now = Utc::now().fixed_offset();
    check_pending_otp(account.otp.as_deref(), account.otp_expires_at, code, now)?;

    let hash = hasher
        .hash(new_password.as_bytes())
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;

    let mut active = account.into_active_model();
    active.password = Set(hash);
    active.otp = Set(None);
    active.otp_expires_at = Set(None);
    active.updated_at = Set(now);
    active.update(db).await?;

    Ok(())
}
