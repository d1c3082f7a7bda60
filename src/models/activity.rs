use chrono::NaiveDate;
use serde::Serialize;

use super::enums::{ActivityStatus, ActivityType};

// Activity row joined with the organizer's display name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityRow {
    pub id_actividad: i64,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub lugar: Option<String>,
    #[sqlx(try_from = "String")]
    pub tipo: ActivityType,
    #[sqlx(try_from = "String")]
    pub estado: ActivityStatus,
    pub capacidad: i64,
    pub inscritos: i64,
    pub organizador_id: Option<i64>,
    pub organizador_nombre: Option<String>,
    pub responsable: Option<String>,
    pub created_at: String,
}
