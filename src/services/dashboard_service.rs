use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::{attendance_repo, dashboard_repo, payment_repo};
use crate::error::AppResult;
use crate::models::ActivityStatus;
use crate::services::attendance_service::{self, AttendanceSummary};
use crate::services::certificate_service::{self, CertificateStats};
use crate::services::payment_service::{self, LedgerSummary};
use crate::services::registration_accounting;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivityCounts {
    pub total: i64,
    pub plazo_registro: i64,
    pub en_ejecucion: i64,
    pub finalizado: i64,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub actividades: ActivityCounts,
    pub usuarios: i64,
    pub inscripciones: i64,
    pub ocupacion_global: f64,
    pub pagos: LedgerSummary,
    pub asistencia: AttendanceSummary,
    pub certificados: CertificateStats,
}

pub async fn load_dashboard(pool: &SqlitePool) -> AppResult<Dashboard> {
    let mut actividades = ActivityCounts::default();
    for (estado, count) in dashboard_repo::count_activities_by_status(pool).await? {
        actividades.total += count;
        match estado.parse::<ActivityStatus>() {
            Ok(ActivityStatus::PlazoRegistro) => actividades.plazo_registro += count,
            Ok(ActivityStatus::EnEjecucion) => actividades.en_ejecucion += count,
            Ok(ActivityStatus::Finalizado) => actividades.finalizado += count,
            Err(e) => warn!("Skipping activities with {}", e),
        }
    }

    let headcount = dashboard_repo::load_headcount(pool).await?;
    let payments = payment_repo::list_payments(pool).await?;
    let (total, presentes) = attendance_repo::count_attendance(pool, None).await?;

    Ok(Dashboard {
        actividades,
        usuarios: headcount.usuarios,
        inscripciones: headcount.inscripciones,
        ocupacion_global: if headcount.capacidad_total > 0 {
            registration_accounting::fill_percentage(
                headcount.capacidad_total,
                headcount.inscritos_total,
            )
        } else {
            0.0
        },
        pagos: payment_service::summarize(payments.iter().map(|p| (p.estado, p.monto))),
        asistencia: attendance_service::attendance_summary(total, presentes),
        certificados: certificate_service::certificate_stats(pool).await?,
    })
}
