use chrono::Utc;
use nanoid::nanoid;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::Set,
    DatabaseConnection, EntityTrait, ModelTrait, QueryOrder,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{entities::appointment, error::ServiceError};

/// Booking payload as submitted by the public form. Stored verbatim, no
/// field validation and no deduplication of repeat submissions.
#[derive(Deserialize, ToSchema)]
pub struct NewAppointment {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub preferred_date: Option<String>,
    pub alternate_date: Option<String>,
    pub preferred_time: Option<String>,
    pub alternate_time: Option<String>,
    pub appointment_type: Option<String>,
    pub reason: Option<String>,
}

pub async fn create(
    db: &DatabaseConnection,
    fields: NewAppointment,
) -> Result<appointment::Model, ServiceError> {
    let now = Utc::now().fixed_offset();

    let stored = appointment::ActiveModel {
        id: Set(nanoid!()),
        name: Set(fields.name),
        dob: Set(fields.dob),
        gender: Set(fields.gender),
        phone: Set(fields.phone),
        email: Set(fields.email),
        address: Set(fields.address),
        preferred_date: Set(fields.preferred_date),
        alternate_date: Set(fields.alternate_date),
        preferred_time: Set(fields.preferred_time),
        alternate_time: Set(fields.alternate_time),
        appointment_type: Set(fields.appointment_type),
        reason: Set(fields.reason),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(stored)
}

/// All appointments, most recent first, materialized in one query.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<appointment::Model>, ServiceError> {
    let appointments = appointment::Entity::find()
        .order_by_desc(appointment::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(appointments)
}

/// Delete by id. A missing id is not an error: the operation is idempotent
/// and reports success with no payload.
pub async fn delete(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<appointment::Model>, ServiceError> {
    let appointment = match appointment::Entity::find_by_id(id).one(db).await? {
        Some(appointment) => appointment,
        None => return Ok(None),
    };

    appointment.clone().delete(db).await?;

    Ok(Some(appointment))
}
