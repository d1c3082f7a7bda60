//! Closed vocabularies for the enumerated columns.
//!
//! Every enum is stored as its `as_str()` code in a TEXT column and decoded
//! through `TryFrom<String>` (see the `#[sqlx(try_from = "String")]` fields
//! on the row structs), so an unknown code in the database is a decode error
//! rather than a silently accepted string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("valor desconocido para {field}: {value:?}")]
pub struct UnknownCode {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Conferencia,
    Taller,
    Diplomado,
    Workshop,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Conferencia,
        ActivityType::Taller,
        ActivityType::Diplomado,
        ActivityType::Workshop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Conferencia => "Conferencia",
            ActivityType::Taller => "Taller",
            ActivityType::Diplomado => "Diplomado",
            ActivityType::Workshop => "Workshop",
        }
    }
}

impl FromStr for ActivityType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCode {
                field: "tipo",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[serde(rename = "plazo_registro")]
    PlazoRegistro,
    #[serde(rename = "en_ejecución", alias = "en_ejecucion")]
    EnEjecucion,
    #[serde(rename = "finalizado")]
    Finalizado,
}

impl ActivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityStatus::PlazoRegistro => "plazo_registro",
            ActivityStatus::EnEjecucion => "en_ejecución",
            ActivityStatus::Finalizado => "finalizado",
        }
    }

    /// Only activities still inside their registration window take new
    /// inscriptions.
    pub fn accepts_registrations(self) -> bool {
        match self {
            ActivityStatus::PlazoRegistro => true,
            ActivityStatus::EnEjecucion | ActivityStatus::Finalizado => false,
        }
    }
}

impl FromStr for ActivityStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "plazo_registro" => Ok(ActivityStatus::PlazoRegistro),
            "en_ejecución" | "en_ejecucion" => Ok(ActivityStatus::EnEjecucion),
            "finalizado" => Ok(ActivityStatus::Finalizado),
            other => Err(UnknownCode {
                field: "estado",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InscriptionStatus {
    Confirmada,
    Pendiente,
    Completada,
}

impl InscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InscriptionStatus::Confirmada => "confirmada",
            InscriptionStatus::Pendiente => "pendiente",
            InscriptionStatus::Completada => "completada",
        }
    }
}

impl FromStr for InscriptionStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "confirmada" => Ok(InscriptionStatus::Confirmada),
            "pendiente" => Ok(InscriptionStatus::Pendiente),
            "completada" => Ok(InscriptionStatus::Completada),
            other => Err(UnknownCode {
                field: "estado",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Transfer,
    #[serde(alias = "Yape")]
    Yape,
    #[serde(alias = "Plin")]
    Plin,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Yape => "yape",
            PaymentMethod::Plin => "plin",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            "yape" => Ok(PaymentMethod::Yape),
            "plin" => Ok(PaymentMethod::Plin),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(UnknownCode {
                field: "metodo",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pagado,
    Pendiente,
    Rechazado,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pagado => "pagado",
            PaymentStatus::Pendiente => "pendiente",
            PaymentStatus::Rechazado => "rechazado",
        }
    }

    /// A pending payment settles either way; a rejected one may be retried.
    /// Settled payments are final.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pendiente, PaymentStatus::Pagado)
                | (PaymentStatus::Pendiente, PaymentStatus::Rechazado)
                | (PaymentStatus::Rechazado, PaymentStatus::Pendiente)
        )
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pagado" => Ok(PaymentStatus::Pagado),
            "pendiente" => Ok(PaymentStatus::Pendiente),
            "rechazado" => Ok(PaymentStatus::Rechazado),
            other => Err(UnknownCode {
                field: "estado",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Emitido,
    Pendiente,
    Rechazado,
}

impl CertificateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CertificateStatus::Emitido => "emitido",
            CertificateStatus::Pendiente => "pendiente",
            CertificateStatus::Rechazado => "rechazado",
        }
    }
}

impl FromStr for CertificateStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "emitido" => Ok(CertificateStatus::Emitido),
            "pendiente" => Ok(CertificateStatus::Pendiente),
            "rechazado" => Ok(CertificateStatus::Rechazado),
            other => Err(UnknownCode {
                field: "estado",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Participante,
    Organizador,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Participante => "participante",
            Role::Organizador => "organizador",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "participante" => Ok(Role::Participante),
            "organizador" => Ok(Role::Organizador),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownCode {
                field: "rol",
                value: other.to_string(),
            }),
        }
    }
}

macro_rules! text_column {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = UnknownCode;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

text_column!(
    ActivityType,
    ActivityStatus,
    InscriptionStatus,
    PaymentMethod,
    PaymentStatus,
    CertificateStatus,
    Role,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_status_accepts_both_spellings_of_en_ejecucion() {
        assert_eq!(
            "en_ejecución".parse::<ActivityStatus>().unwrap(),
            ActivityStatus::EnEjecucion
        );
        assert_eq!(
            "en_ejecucion".parse::<ActivityStatus>().unwrap(),
            ActivityStatus::EnEjecucion
        );
        assert_eq!(ActivityStatus::EnEjecucion.as_str(), "en_ejecución");
    }

    #[test]
    fn activity_type_parse_ignores_case() {
        assert_eq!("taller".parse::<ActivityType>().unwrap(), ActivityType::Taller);
        assert!("Seminario".parse::<ActivityType>().is_err());
    }

    #[test]
    fn serde_names_match_column_codes() {
        assert_eq!(
            serde_json::to_string(&ActivityStatus::EnEjecucion).unwrap(),
            "\"en_ejecución\""
        );
        assert_eq!(serde_json::to_string(&PaymentMethod::Yape).unwrap(), "\"yape\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn wallet_names_deserialize_as_shown_in_the_admin_form() {
        for (raw, method) in [
            ("\"Yape\"", PaymentMethod::Yape),
            ("\"yape\"", PaymentMethod::Yape),
            ("\"Plin\"", PaymentMethod::Plin),
        ] {
            assert_eq!(serde_json::from_str::<PaymentMethod>(raw).unwrap(), method);
        }
        assert_eq!(serde_json::to_string(&PaymentMethod::Plin).unwrap(), "\"plin\"");
    }

    #[test]
    fn settled_payments_are_final() {
        use PaymentStatus::*;
        assert!(Pendiente.can_transition_to(Pagado));
        assert!(Pendiente.can_transition_to(Rechazado));
        assert!(Rechazado.can_transition_to(Pendiente));
        assert!(!Pagado.can_transition_to(Pendiente));
        assert!(!Pagado.can_transition_to(Rechazado));
        assert!(!Pendiente.can_transition_to(Pendiente));
    }

    #[test]
    fn unknown_code_names_the_field() {
        let err = "socio".parse::<Role>().unwrap_err();
        assert_eq!(err.field, "rol");
        assert_eq!(err.value, "socio");
    }
}
