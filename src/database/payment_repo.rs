use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{PaymentMethod, PaymentRow, PaymentStatus};

const SQL_LIST_PAYMENTS: &str = r#"
SELECT
  p.id_pago,
  p.inscripcion_id,
  p.monto,
  p.moneda,
  p.metodo,
  p.estado,
  p.comprobante,
  p.fecha_pago,
  u.nombres || ' ' || u.apellidos AS participante,
  u.correo,
  a.titulo AS actividad
FROM pago p
JOIN inscripcion i
  ON i.id_inscripcion = p.inscripcion_id
JOIN usuario u
  ON u.id_usuario = i.usuario_id
JOIN actividad a
  ON a.id_actividad = i.actividad_id
ORDER BY p.id_pago ASC
"#;

pub async fn list_payments(pool: &SqlitePool) -> sqlx::Result<Vec<PaymentRow>> {
    sqlx::query_as::<_, PaymentRow>(SQL_LIST_PAYMENTS)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_PAYMENT_BY_ID: &str = r#"
SELECT
  p.id_pago,
  p.inscripcion_id,
  p.monto,
  p.moneda,
  p.metodo,
  p.estado,
  p.comprobante,
  p.fecha_pago,
  u.nombres || ' ' || u.apellidos AS participante,
  u.correo,
  a.titulo AS actividad
FROM pago p
JOIN inscripcion i
  ON i.id_inscripcion = p.inscripcion_id
JOIN usuario u
  ON u.id_usuario = i.usuario_id
JOIN actividad a
  ON a.id_actividad = i.actividad_id
WHERE p.id_pago = ?1
LIMIT 1
"#;

pub async fn load_payment(pool: &SqlitePool, id_pago: i64) -> sqlx::Result<Option<PaymentRow>> {
    sqlx::query_as::<_, PaymentRow>(SQL_LOAD_PAYMENT_BY_ID)
        .bind(id_pago)
        .fetch_optional(pool)
        .await
}

const SQL_INSERT_PAYMENT: &str = r#"
INSERT INTO pago (
  inscripcion_id,
  monto,
  moneda,
  metodo,
  estado,
  comprobante,
  fecha_pago
) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewPayment<'a> {
    pub inscripcion_id: i64,
    pub monto: f64,
    pub moneda: &'a str,
    pub metodo: PaymentMethod,
    pub estado: PaymentStatus,
    pub comprobante: Option<&'a str>,
    pub fecha_pago: Option<NaiveDate>,
}

pub async fn insert_payment(pool: &SqlitePool, payment: NewPayment<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_PAYMENT)
        .bind(payment.inscripcion_id)
        .bind(payment.monto)
        .bind(payment.moneda)
        .bind(payment.metodo.as_str())
        .bind(payment.estado.as_str())
        .bind(payment.comprobante)
        .bind(payment.fecha_pago)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

// Compare-and-set on the current status so a concurrent change is not
// silently overwritten.
const SQL_UPDATE_PAYMENT_STATUS: &str = r#"
UPDATE pago
SET estado = ?1,
    fecha_pago = COALESCE(?2, fecha_pago)
WHERE id_pago = ?3
  AND estado = ?4
"#;

pub async fn update_payment_status(
    pool: &SqlitePool,
    id_pago: i64,
    from: PaymentStatus,
    to: PaymentStatus,
    fecha_pago: Option<NaiveDate>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_PAYMENT_STATUS)
        .bind(to.as_str())
        .bind(fecha_pago)
        .bind(id_pago)
        .bind(from.as_str())
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
