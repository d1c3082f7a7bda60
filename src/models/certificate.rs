use chrono::NaiveDate;
use serde::Serialize;

use super::enums::CertificateStatus;

// Certificate joined through attendance and inscription to the participant
// and activity it certifies.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CertificateRow {
    pub id_certificado: i64,
    pub codigo_validacion: String,
    pub asistencia_id: i64,
    #[sqlx(try_from = "String")]
    pub estado: CertificateStatus,
    pub fecha_emision: Option<NaiveDate>,
    pub url_pdf: Option<String>,
    pub presente: bool,
    pub participante: String,
    pub actividad: String,
}
