use sqlx::SqlitePool;

const SQL_COUNT_ACTIVITIES_BY_STATUS: &str = r#"
SELECT estado, COUNT(*)
FROM actividad
GROUP BY estado
"#;

pub async fn count_activities_by_status(pool: &SqlitePool) -> sqlx::Result<Vec<(String, i64)>> {
    sqlx::query_as::<_, (String, i64)>(SQL_COUNT_ACTIVITIES_BY_STATUS)
        .fetch_all(pool)
        .await
}

#[derive(Debug, sqlx::FromRow)]
pub struct HeadcountRow {
    pub usuarios: i64,
    pub inscripciones: i64,
    pub capacidad_total: i64,
    pub inscritos_total: i64,
}

const SQL_LOAD_HEADCOUNT: &str = r#"
SELECT
  (SELECT COUNT(*) FROM usuario) AS usuarios,
  (SELECT COUNT(*) FROM inscripcion) AS inscripciones,
  (SELECT COALESCE(SUM(capacidad), 0) FROM actividad) AS capacidad_total,
  (SELECT COALESCE(SUM(inscritos), 0) FROM actividad) AS inscritos_total
"#;

pub async fn load_headcount(pool: &SqlitePool) -> sqlx::Result<HeadcountRow> {
    sqlx::query_as::<_, HeadcountRow>(SQL_LOAD_HEADCOUNT)
        .fetch_one(pool)
        .await
}
