use chrono::NaiveDate;
use serde::Serialize;

use super::enums::InscriptionStatus;

// Inscription joined with the participant and the activity it targets.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InscriptionRow {
    pub id_inscripcion: i64,
    pub usuario_id: i64,
    pub actividad_id: i64,
    #[sqlx(try_from = "String")]
    pub estado: InscriptionStatus,
    pub fecha_inscripcion: String,
    pub nombres: String,
    pub apellidos: String,
    pub correo: String,
    pub titulo: String,
    pub fecha_inicio: NaiveDate,
}
