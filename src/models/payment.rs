use chrono::NaiveDate;
use serde::Serialize;

use super::enums::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaymentRow {
    pub id_pago: i64,
    pub inscripcion_id: i64,
    pub monto: f64,
    pub moneda: String,
    #[sqlx(try_from = "String")]
    pub metodo: PaymentMethod,
    #[sqlx(try_from = "String")]
    pub estado: PaymentStatus,
    pub comprobante: Option<String>,
    pub fecha_pago: Option<NaiveDate>,
    pub participante: String,
    pub correo: String,
    pub actividad: String,
}
