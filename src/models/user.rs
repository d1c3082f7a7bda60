use serde::Serialize;

use super::enums::Role;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserRow {
    pub id_usuario: i64,
    pub nombres: String,
    pub apellidos: String,
    pub correo: String,
    pub telefono: Option<String>,
    pub dni: Option<String>,
    #[sqlx(try_from = "String")]
    pub rol: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl UserRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombres.trim(), self.apellidos.trim())
    }
}

// Only read on login; never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentialsRow {
    pub id_usuario: i64,
    pub password_hash: String,
}
