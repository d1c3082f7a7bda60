pub mod activity;
pub mod attendance;
pub mod certificate;
pub mod enums;
pub mod inscription;
pub mod payment;
pub mod user;

pub use activity::ActivityRow;
pub use attendance::AttendanceRow;
pub use certificate::CertificateRow;
pub use enums::{
    ActivityStatus, ActivityType, CertificateStatus, InscriptionStatus, PaymentMethod,
    PaymentStatus, Role, UnknownCode,
};
pub use inscription::InscriptionRow;
pub use payment::PaymentRow;
pub use user::{UserCredentialsRow, UserRow};
