pub mod actividad;
pub mod asistencia;
pub mod auth;
pub mod certificado;
pub mod dashboard;
pub mod eventos;
pub mod health;
pub mod inscripcion;
pub mod pago;
pub mod usuario;
