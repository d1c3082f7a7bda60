use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::database::attendance_repo;
use crate::error::{AppError, AppResult};
use crate::models::AttendanceRow;
use crate::services::validation;

#[derive(Debug, Deserialize, Default)]
pub struct AttendanceQuery {
    pub actividad_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordAttendanceRequest {
    pub inscripcion_id: i64,
    #[validate(custom(function = "validation::not_blank"))]
    pub sesion: String,
    #[serde(default = "present_by_default")]
    pub presente: bool,
}

fn present_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub total: i64,
    pub presentes: i64,
    pub ausentes: i64,
    pub porcentaje: i64,
}

/// Whole-number attendance rate; 0 for an empty register.
pub fn attendance_summary(total: i64, presentes: i64) -> AttendanceSummary {
    let porcentaje = if total > 0 {
        (presentes as f64 / total as f64 * 100.0).round() as i64
    } else {
        0
    };
    AttendanceSummary {
        total,
        presentes,
        ausentes: total - presentes,
        porcentaje,
    }
}

pub async fn list_attendance(
    pool: &SqlitePool,
    query: &AttendanceQuery,
) -> AppResult<Vec<AttendanceRow>> {
    Ok(attendance_repo::list_attendance(pool, query.actividad_id).await?)
}

pub async fn load_attendance(pool: &SqlitePool, id_asistencia: i64) -> AppResult<AttendanceRow> {
    attendance_repo::load_attendance(pool, id_asistencia)
        .await?
        .ok_or(AppError::NotFound("asistencia"))
}

pub async fn record_attendance(
    pool: &SqlitePool,
    req: RecordAttendanceRequest,
) -> AppResult<AttendanceRow> {
    req.validate()?;
    let id = attendance_repo::insert_attendance(
        pool,
        req.inscripcion_id,
        req.sesion.trim(),
        req.presente,
    )
    .await?;
    info!(
        "Attendance {} recorded for inscription {} ({})",
        id,
        req.inscripcion_id,
        req.sesion.trim()
    );
    load_attendance(pool, id).await
}

pub async fn toggle_attendance(pool: &SqlitePool, id_asistencia: i64) -> AppResult<AttendanceRow> {
    if attendance_repo::toggle_attendance(pool, id_asistencia).await? == 0 {
        return Err(AppError::NotFound("asistencia"));
    }
    load_attendance(pool, id_asistencia).await
}

pub async fn summary(pool: &SqlitePool, query: &AttendanceQuery) -> AppResult<AttendanceSummary> {
    let (total, presentes) = attendance_repo::count_attendance(pool, query.actividad_id).await?;
    Ok(attendance_summary(total, presentes))
}
