use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::{activity_repo, inscription_repo};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::models::{InscriptionRow, InscriptionStatus, UserRow};

#[derive(Debug, Deserialize, Default)]
pub struct InscriptionQuery {
    pub actividad_id: Option<i64>,
    pub usuario_id: Option<i64>,
}

pub async fn list_inscriptions(
    pool: &SqlitePool,
    query: &InscriptionQuery,
) -> AppResult<Vec<InscriptionRow>> {
    Ok(inscription_repo::list_inscriptions(pool, query.actividad_id, query.usuario_id).await?)
}

/// Takes a spot and records the inscription in one transaction.
///
/// The spot is claimed with a guarded increment, so `inscritos` never passes
/// `capacidad` however many requests race. When the guard matches nothing
/// the activity is re-read inside the same transaction to tell a missing
/// activity from a closed or full one.
pub async fn register_for_activity(
    pool: &SqlitePool,
    usuario: &UserRow,
    id_actividad: i64,
) -> AppResult<InscriptionRow> {
    let mut tx = pool.begin().await?;

    if activity_repo::claim_spot(&mut *tx, id_actividad).await? == 0 {
        let activity = activity_repo::load_activity(&mut *tx, id_actividad).await?;
        return Err(match activity {
            None => AppError::NotFound("actividad"),
            Some(a) if !a.estado.accepts_registrations() => {
                AppError::conflict("la actividad no acepta inscripciones")
            }
            Some(_) => AppError::conflict("la actividad no tiene cupos disponibles"),
        });
    }

    let inserted = inscription_repo::insert_inscription(
        &mut *tx,
        usuario.id_usuario,
        id_actividad,
        InscriptionStatus::Confirmada,
    )
    .await;
    let id_inscripcion = match inserted {
        Ok(id) => id,
        Err(e) if is_unique_violation(&e) => {
            warn!(
                "User {} tried to register twice for activity {}",
                usuario.id_usuario, id_actividad
            );
            return Err(AppError::conflict("ya estás inscrito en esta actividad"));
        }
        Err(e) => return Err(e.into()),
    };

    tx.commit().await?;
    info!(
        "{} (user {}) registered for activity {} as inscription {}",
        usuario.full_name(),
        usuario.id_usuario,
        id_actividad,
        id_inscripcion
    );

    inscription_repo::load_inscription(pool, id_inscripcion)
        .await?
        .ok_or(AppError::NotFound("inscripción"))
}
