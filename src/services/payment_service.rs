//! Payment ledger: listing with totals, manual entries and status changes.

use chrono::Local;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

use crate::database::payment_repo::{self, NewPayment};
use crate::error::{AppError, AppResult};
use crate::models::{PaymentMethod, PaymentRow, PaymentStatus};
use crate::services::validation::clean;

pub const DEFAULT_CURRENCY: &str = "PEN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_recaudado: f64,
    pub total_pendiente: f64,
    pub total_rechazado: f64,
    pub pagados: i64,
    pub pendientes: i64,
    pub rechazados: i64,
    pub porcentaje_cobertura: f64,
}

#[derive(Debug, Serialize)]
pub struct PaymentLedger {
    pub pagos: Vec<PaymentRow>,
    pub resumen: LedgerSummary,
}

#[derive(Debug, Deserialize, Default)]
pub struct PaymentQuery {
    pub estado: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ManualPaymentRequest {
    pub inscripcion_id: i64,
    #[validate(range(exclusive_min = 0.0, message = "el monto debe ser mayor que cero"))]
    pub monto: f64,
    pub moneda: Option<String>,
    pub metodo: PaymentMethod,
    pub comprobante: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub estado: PaymentStatus,
}

/// Totals per status. Coverage is collected over collected plus pending,
/// rounded to one decimal, and 0 when nothing is owed.
pub fn summarize<I>(payments: I) -> LedgerSummary
where
    I: IntoIterator<Item = (PaymentStatus, f64)>,
{
    let mut summary = LedgerSummary::default();
    for (estado, monto) in payments {
        match estado {
            PaymentStatus::Pagado => {
                summary.total_recaudado += monto;
                summary.pagados += 1;
            }
            PaymentStatus::Pendiente => {
                summary.total_pendiente += monto;
                summary.pendientes += 1;
            }
            PaymentStatus::Rechazado => {
                summary.total_rechazado += monto;
                summary.rechazados += 1;
            }
        }
    }

    let owed = summary.total_recaudado + summary.total_pendiente;
    if owed > 0.0 {
        summary.porcentaje_cobertura = (summary.total_recaudado / owed * 1000.0).round() / 10.0;
    }
    summary
}

/// The `estado` filter narrows `pagos` only; `resumen` always covers the
/// whole ledger.
pub async fn list_payments(pool: &SqlitePool, query: &PaymentQuery) -> AppResult<PaymentLedger> {
    let mut pagos = payment_repo::list_payments(pool).await?;
    let resumen = summarize(pagos.iter().map(|p| (p.estado, p.monto)));
    if let Some(estado) = query.estado {
        pagos.retain(|p| p.estado == estado);
    }
    Ok(PaymentLedger { pagos, resumen })
}

pub async fn load_payment(pool: &SqlitePool, id_pago: i64) -> AppResult<PaymentRow> {
    payment_repo::load_payment(pool, id_pago)
        .await?
        .ok_or(AppError::NotFound("pago"))
}

/// Records a payment taken at the desk: it is settled on entry and dated
/// today.
pub async fn register_manual_payment(
    pool: &SqlitePool,
    req: ManualPaymentRequest,
) -> AppResult<PaymentRow> {
    req.validate()?;

    let moneda = clean(req.moneda.as_deref())
        .map(str::to_uppercase)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let id = payment_repo::insert_payment(
        pool,
        NewPayment {
            inscripcion_id: req.inscripcion_id,
            monto: req.monto,
            moneda: &moneda,
            metodo: req.metodo,
            estado: PaymentStatus::Pagado,
            comprobante: clean(req.comprobante.as_deref()),
            fecha_pago: Some(Local::now().date_naive()),
        },
    )
    .await?;

    info!(
        "Manual payment {} of {:.2} {} for inscription {}",
        id, req.monto, moneda, req.inscripcion_id
    );
    load_payment(pool, id).await
}

pub async fn change_status(
    pool: &SqlitePool,
    id_pago: i64,
    next: PaymentStatus,
) -> AppResult<PaymentRow> {
    let current = load_payment(pool, id_pago).await?;
    if !current.estado.can_transition_to(next) {
        warn!(
            "Rejected payment {} transition {} -> {}",
            id_pago,
            current.estado.as_str(),
            next.as_str()
        );
        return Err(AppError::conflict(format!(
            "no se puede pasar un pago {} a {}",
            current.estado.as_str(),
            next.as_str()
        )));
    }

    let fecha_pago = (next == PaymentStatus::Pagado).then(|| Local::now().date_naive());
    let affected =
        payment_repo::update_payment_status(pool, id_pago, current.estado, next, fecha_pago).await?;
    if affected == 0 {
        return Err(AppError::conflict("el pago cambió mientras se actualizaba"));
    }

    info!("Payment {} moved to {}", id_pago, next.as_str());
    load_payment(pool, id_pago).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_has_zero_coverage() {
        let summary = summarize(std::iter::empty());
        assert_eq!(summary.porcentaje_cobertura, 0.0);
        assert!(!summary.porcentaje_cobertura.is_nan());
    }

    #[test]
    fn rejected_only_ledger_has_zero_coverage() {
        let summary = summarize([(PaymentStatus::Rechazado, 150.0)]);
        assert_eq!(summary.total_rechazado, 150.0);
        assert_eq!(summary.rechazados, 1);
        assert_eq!(summary.porcentaje_cobertura, 0.0);
    }

    #[test]
    fn totals_and_coverage_by_status() {
        let summary = summarize([
            (PaymentStatus::Pagado, 150.0),
            (PaymentStatus::Pagado, 80.0),
            (PaymentStatus::Pendiente, 200.0),
            (PaymentStatus::Rechazado, 50.0),
            (PaymentStatus::Pendiente, 120.0),
        ]);
        assert_eq!(summary.total_recaudado, 230.0);
        assert_eq!(summary.total_pendiente, 320.0);
        assert_eq!(summary.total_rechazado, 50.0);
        assert_eq!((summary.pagados, summary.pendientes, summary.rechazados), (2, 2, 1));
        // 230 / 550
        assert_eq!(summary.porcentaje_cobertura, 41.8);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let req = ManualPaymentRequest {
            inscripcion_id: 1,
            monto: 0.0,
            moneda: None,
            metodo: PaymentMethod::Cash,
            comprobante: None,
        };
        assert!(req.validate().is_err());
    }
}
