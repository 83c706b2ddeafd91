#[cfg(test)]
mod tests {
    use super::super::otp_service::{check_pending_otp, gen_otp_code};
    use crate::error::ServiceError;
    use chrono::{Duration, Utc};

    #[test]
    fn test_generated_code_is_six_digits_in_range() {
        for _ in 0..200 {
            let code = gen_otp_code();
            assert_eq!(code.len(), 6, "code was {code}");
            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value), "code was {code}");
        }
    }

    #[test]
    fn test_correct_code_within_window_passes() {
        let now = Utc::now().fixed_offset();
        let expires = now + Duration::minutes(5);
        assert!(check_pending_otp(Some("123456"), Some(expires), "123456", now).is_ok());
    }

    #[test]
    fn test_no_pending_code() {
        let now = Utc::now().fixed_offset();
        let result = check_pending_otp(None, None, "123456", now);
        assert!(matches!(result, Err(ServiceError::NoPendingOtp)));
    }

    #[test]
    fn test_expiry_is_exclusive_at_the_boundary() {
        // A request at exactly the expiry instant is still valid
        let now = Utc::now().fixed_offset();
        assert!(check_pending_otp(Some("123456"), Some(now), "123456", now).is_ok());
    }

    #[test]
    fn test_expired_code_fails_even_when_correct() {
        let now = Utc::now().fixed_offset();
        let expires = now - Duration::seconds(1);
        let result = check_pending_otp(Some("123456"), Some(expires), "123456", now);
        assert!(matches!(result, Err(ServiceError::OtpExpired)));
    }

    #[test]
    fn test_wrong_code_is_a_mismatch_not_a_consumption() {
        let now = Utc::now().fixed_offset();
        let expires = now + Duration::minutes(5);

        let result = check_pending_otp(Some("123456"), Some(expires), "000000", now);
        assert!(matches!(result, Err(ServiceError::OtpMismatch)));

        // The check takes the pending state by reference, so a failed attempt
        // cannot clear it; the correct code still passes afterwards.
        assert!(check_pending_otp(Some("123456"), Some(expires), "123456", now).is_ok());
    }

    #[test]
    fn test_codes_compare_as_opaque_strings() {
        let now = Utc::now().fixed_offset();
        let expires = now + Duration::minutes(5);

        // "0123456" parsed numerically would equal 123456; as strings they differ
        let result = check_pending_otp(Some("123456"), Some(expires), "0123456", now);
        assert!(matches!(result, Err(ServiceError::OtpMismatch)));
    }

    #[test]
    fn test_expired_check_runs_before_mismatch() {
        let now = Utc::now().fixed_offset();
        let expires = now - Duration::minutes(1);
        let result = check_pending_otp(Some("123456"), Some(expires), "000000", now);
        assert!(matches!(result, Err(ServiceError::OtpExpired)));
    }

    use super::super::otp_service::{generate, verify};
    use crate::entities::admin;
    use chrono::{DateTime, FixedOffset};
    use nanoid::nanoid;
    use sea_orm::{
        ActiveModelTrait, ActiveValue::Set, ConnectionTrait, Database, DatabaseConnection,
        DbBackend, Schema,
    };

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let schema = Schema::new(DbBackend::Sqlite);
        let stmt = schema.create_table_from_entity(admin::Entity);
        db.execute(&stmt).await.unwrap();
        db
    }

    async fn seed_admin(
        db: &DatabaseConnection,
        otp: Option<&str>,
        otp_expires_at: Option<DateTime<FixedOffset>>,
    ) {
        let now = Utc::now().fixed_offset();
        admin::ActiveModel {
            id: Set(nanoid!()),
            email: Set("admin@x.com".to_string()),
            password: Set("$argon2id$unused".to_string()),
            otp: Set(otp.map(str::to_owned)),
            otp_expires_at: Set(otp_expires_at),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_verify_consumes_the_code() {
        let db = setup_db().await;
        let expires = Utc::now().fixed_offset() + Duration::minutes(5);
        seed_admin(&db, Some("123456"), Some(expires)).await;

        verify(&db, "admin@x.com", "123456").await.unwrap();

        // The code was cleared, so the same code cannot be replayed
        let second = verify(&db, "admin@x.com", "123456").await;
        assert!(matches!(second, Err(ServiceError::NoPendingOtp)));
    }

    #[tokio::test]
    async fn test_failed_verify_leaves_the_code_in_the_store() {
        let db = setup_db().await;
        let expires = Utc::now().fixed_offset() + Duration::minutes(5);
        seed_admin(&db, Some("123456"), Some(expires)).await;

        let wrong = verify(&db, "admin@x.com", "000000").await;
        assert!(matches!(wrong, Err(ServiceError::OtpMismatch)));

        // The pending code survived the mismatch and still verifies
        verify(&db, "admin@x.com", "123456").await.unwrap();
    }

    #[tokio::test]
    async fn test_generate_then_verify_round_trip() {
        let db = setup_db().await;
        seed_admin(&db, None, None).await;

        let code = generate(&db, "admin@x.com", Duration::minutes(5))
            .await
            .unwrap();
        assert_eq!(code.len(), 6);

        verify(&db, "admin@x.com", &code).await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_unknown_email_is_not_found() {
        let db = setup_db().await;

        let result = verify(&db, "nobody@x.com", "123456").await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_verify_without_a_pending_code() {
        let db = setup_db().await;
        seed_admin(&db, None, None).await;

        let result = verify(&db, "admin@x.com", "123456").await;
        assert!(matches!(result, Err(ServiceError::NoPendingOtp)));
    }
}
