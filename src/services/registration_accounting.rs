//! Capacity accounting for activities.
//!
//! Pure functions over `(capacidad, inscritos)`. Stored data may be
//! inconsistent (an admin can lower `capacidad` below `inscritos`), so every
//! output is clamped to a displayable range and the inconsistency is
//! reported separately through [`CapacityView::sobrecupo`].

use serde::Serialize;

use crate::models::ActivityStatus;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityView {
    pub cupos_disponibles: i64,
    pub porcentaje_ocupacion: f64,
    pub lleno: bool,
    pub sobrecupo: bool,
    pub puede_inscribirse: bool,
}

/// Free spots, never negative.
pub fn available_spots(capacity: i64, inscribed: i64) -> i64 {
    capacity.saturating_sub(inscribed).max(0)
}

/// Percentage of capacity taken, in `[0, 100]`, rounded to one decimal.
/// A zero-capacity activity counts as full.
pub fn fill_percentage(capacity: i64, inscribed: i64) -> f64 {
    if capacity <= 0 {
        return 100.0;
    }
    let pct = (inscribed as f64 / capacity as f64) * 100.0;
    (pct.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

pub fn can_register(capacity: i64, inscribed: i64, status: ActivityStatus) -> bool {
    status.accepts_registrations() && available_spots(capacity, inscribed) > 0
}

pub fn capacity_view(capacity: i64, inscribed: i64, status: ActivityStatus) -> CapacityView {
    let cupos_disponibles = available_spots(capacity, inscribed);
    CapacityView {
        cupos_disponibles,
        porcentaje_ocupacion: fill_percentage(capacity, inscribed),
        lleno: cupos_disponibles == 0,
        sobrecupo: inscribed > capacity,
        puede_inscribirse: can_register(capacity, inscribed, status),
    }
}
