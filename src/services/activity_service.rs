use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::database::activity_repo::{self, ActivityChanges, NewActivity};
use crate::error::{AppError, AppResult};
use crate::models::{ActivityRow, ActivityStatus, ActivityType};
use crate::services::registration_accounting::{self, CapacityView};
use crate::services::validation::{self, clean};

pub const ITEMS_PER_PAGE: i64 = 9;

#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: ActivityRow,
    #[serde(flatten)]
    pub cupos: CapacityView,
}

impl From<ActivityRow> for ActivityView {
    fn from(activity: ActivityRow) -> Self {
        let cupos = registration_accounting::capacity_view(
            activity.capacidad,
            activity.inscritos,
            activity.estado,
        );
        ActivityView { activity, cupos }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(custom(function = "validation::not_blank"))]
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub lugar: Option<String>,
    pub tipo: ActivityType,
    pub estado: Option<ActivityStatus>,
    #[validate(range(min = 0, message = "la capacidad no puede ser negativa"))]
    pub capacidad: i64,
    pub organizador_id: Option<i64>,
    pub responsable: Option<String>,
}

// PUT bodies are partial: absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(custom(function = "validation::not_blank"))]
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub lugar: Option<String>,
    pub tipo: Option<ActivityType>,
    pub estado: Option<ActivityStatus>,
    #[validate(range(min = 0, message = "la capacidad no puede ser negativa"))]
    pub capacidad: Option<i64>,
    pub organizador_id: Option<i64>,
    pub responsable: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CatalogQuery {
    pub tipo: Option<String>,
    pub estado: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub eventos: Vec<ActivityView>,
    pub page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub por_pagina: i64,
}

pub async fn list_activities(pool: &SqlitePool) -> AppResult<Vec<ActivityView>> {
    let rows = activity_repo::list_activities(pool).await?;
    Ok(rows.into_iter().map(ActivityView::from).collect())
}

pub async fn load_activity_view(pool: &SqlitePool, id_actividad: i64) -> AppResult<ActivityView> {
    activity_repo::load_activity(pool, id_actividad)
        .await?
        .map(ActivityView::from)
        .ok_or(AppError::NotFound("actividad"))
}

pub async fn create_activity(
    pool: &SqlitePool,
    req: CreateActivityRequest,
) -> AppResult<ActivityView> {
    req.validate()?;
    check_date_order(req.fecha_inicio, req.fecha_fin)?;

    let id = activity_repo::insert_activity(
        pool,
        NewActivity {
            titulo: req.titulo.trim(),
            descripcion: clean(req.descripcion.as_deref()),
            fecha_inicio: req.fecha_inicio,
            fecha_fin: req.fecha_fin,
            lugar: clean(req.lugar.as_deref()),
            tipo: req.tipo,
            estado: req.estado.unwrap_or(ActivityStatus::PlazoRegistro),
            capacidad: req.capacidad,
            inscritos: 0,
            organizador_id: req.organizador_id,
            responsable: clean(req.responsable.as_deref()),
        },
    )
    .await?;

    info!("Activity {} created: {}", id, req.titulo.trim());
    load_activity_view(pool, id).await
}

pub async fn update_activity(
    pool: &SqlitePool,
    id_actividad: i64,
    req: UpdateActivityRequest,
) -> AppResult<ActivityView> {
    req.validate()?;

    let Some(current) = activity_repo::load_activity(pool, id_actividad).await? else {
        return Err(AppError::NotFound("actividad"));
    };
    check_date_order(
        req.fecha_inicio.unwrap_or(current.fecha_inicio),
        req.fecha_fin.unwrap_or(current.fecha_fin),
    )?;

    let affected = activity_repo::update_activity(
        pool,
        id_actividad,
        ActivityChanges {
            titulo: req.titulo.as_deref().map(str::trim),
            descripcion: req.descripcion.as_deref().map(str::trim),
            fecha_inicio: req.fecha_inicio,
            fecha_fin: req.fecha_fin,
            lugar: req.lugar.as_deref().map(str::trim),
            tipo: req.tipo,
            estado: req.estado,
            capacidad: req.capacidad,
            organizador_id: req.organizador_id,
            responsable: req.responsable.as_deref().map(str::trim),
        },
    )
    .await?;
    if affected == 0 {
        return Err(AppError::NotFound("actividad"));
    }

    load_activity_view(pool, id_actividad).await
}

pub async fn delete_activity(pool: &SqlitePool, id_actividad: i64) -> AppResult<()> {
    if activity_repo::delete_activity(pool, id_actividad).await? == 0 {
        return Err(AppError::NotFound("actividad"));
    }
    info!("Activity {} deleted", id_actividad);
    Ok(())
}

pub async fn catalog_page(pool: &SqlitePool, query: &CatalogQuery) -> AppResult<CatalogPage> {
    let tipo = parse_filter::<ActivityType>(query.tipo.as_deref(), "tipo")?;
    let estado = parse_filter::<ActivityStatus>(query.estado.as_deref(), "estado")?;
    let page = query.page.unwrap_or(1).max(1);

    let total_items = activity_repo::count_catalog(pool, tipo, estado).await?;
    let rows = activity_repo::list_catalog_page(
        pool,
        tipo,
        estado,
        ITEMS_PER_PAGE,
        (page - 1).saturating_mul(ITEMS_PER_PAGE),
    )
    .await?;

    Ok(CatalogPage {
        eventos: rows.into_iter().map(ActivityView::from).collect(),
        page,
        total_pages: total_pages(total_items, ITEMS_PER_PAGE),
        total_items,
        por_pagina: ITEMS_PER_PAGE,
    })
}

fn check_date_order(fecha_inicio: NaiveDate, fecha_fin: NaiveDate) -> AppResult<()> {
    if fecha_fin < fecha_inicio {
        return Err(AppError::invalid_field(
            "fecha_fin",
            "la fecha de fin no puede ser anterior a la de inicio",
        ));
    }
    Ok(())
}

/// `None`, blank and `todos` all mean "no filter".
fn parse_filter<T: std::str::FromStr>(raw: Option<&str>, field: &str) -> AppResult<Option<T>> {
    match clean(raw) {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("todos") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::invalid_field(field, "filtro desconocido")),
    }
}

fn total_pages(total_items: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 0;
    }
    (total_items + per_page - 1) / per_page
}
