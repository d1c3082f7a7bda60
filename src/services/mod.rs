pub mod activity_service;
pub mod attendance_service;
pub mod auth_service;
pub mod certificate_service;
pub mod dashboard_service;
pub mod payment_service;
pub mod registration_accounting;
pub mod registration_service;
pub mod seed_service;
pub mod user_service;
pub mod validation;
