use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id_asistencia: i64,
    pub inscripcion_id: i64,
    pub sesion: String,
    pub presente: bool,
    pub registrado_en: String,
    pub participante: String,
    pub dni: Option<String>,
    pub actividad_id: i64,
    pub actividad: String,
}
