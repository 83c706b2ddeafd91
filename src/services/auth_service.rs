use chrono::Utc;
use nanoid::nanoid;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::Set,
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{
    argon_hasher::ArgonHasher, auth_token::TokenSigner, entities::admin, error::ServiceError,
};

/// Creates the admin account. Email is the unique lookup key and is matched
/// case-sensitively.
pub async fn register(
    db: &DatabaseConnection,
    hasher: &ArgonHasher,
    email: &str,
    password: &str,
) -> Result<(), ServiceError> {
    let existing = admin::Entity::find()
        .filter(admin::Column::Email.eq(email))
        .one(db)
        .await?;

    if existing.is_some() {
        return Err(ServiceError::AlreadyExists);
    }

    let hash = hasher
        .hash(password.as_bytes())
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;

    let now = Utc::now().fixed_offset();
    admin::ActiveModel {
        id: Set(nanoid!()),
        email: Set(email.to_owned()),
        password: Set(hash),
        otp: Set(None),
        otp_expires_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(())
}

/// Verifies credentials and issues a 7-day session token. An unknown email
/// and a wrong password are indistinguishable to the caller.
pub async fn login(
    db: &DatabaseConnection,
    hasher: &ArgonHasher,
    signer: &TokenSigner,
    email: &str,
    password: &str,
) -> Result<String, ServiceError> {
    let account = admin::Entity::find()
        .filter(admin::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(ServiceError::InvalidCredentials)?;

    let matches = hasher
        .verify(password.as_bytes(), &account.password)
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;

    if !matches {
        return Err(ServiceError::InvalidCredentials);
    }

    signer.sign(&account.id)
}
